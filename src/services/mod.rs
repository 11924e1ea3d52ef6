pub mod classifier;
pub mod genres;
pub mod providers;
pub mod quiz;
pub mod recommendations;
