use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use mood_match_api::{
    create_router,
    error::{AppError, AppResult},
    models::{CastMember, Movie, MovieDetails, QuestionBank, WatchProviders},
    services::{providers::MovieProvider, recommendations::RecommendationSettings},
    AppState,
};

/// Provider returning canned movies; watch providers fail for movie 2 and only
/// movie 13 has details
#[derive(Clone)]
struct StubProvider;

#[async_trait::async_trait]
impl MovieProvider for StubProvider {
    async fn discover_by_genres(
        &self,
        genre_ids: &[u32],
        _min_vote_average: f64,
    ) -> AppResult<Vec<Movie>> {
        Ok((1..=3)
            .map(|id| Movie {
                id,
                title: format!("Genre {} pick {}", genre_ids[0], id),
                overview: None,
                poster_url: None,
                release_year: Some(2001),
                rating: 7.2,
                genre: "Comedy".to_string(),
            })
            .collect())
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        if movie_id != 13 {
            return Err(AppError::NotFound(format!("TMDB resource /movie/{}", movie_id)));
        }
        Ok(MovieDetails {
            id: 13,
            title: "Forrest Gump".to_string(),
            overview: None,
            release_date: Some("1994-06-23".to_string()),
            runtime: Some(142),
            rating: 8.5,
            vote_count: 27000,
            genres: vec!["Comedy".to_string(), "Drama".to_string()],
            poster_url: None,
            backdrop_url: None,
            production_companies: vec!["Paramount".to_string()],
            cast: vec![CastMember {
                name: "Tom Hanks".to_string(),
                character: Some("Forrest Gump".to_string()),
                profile_url: None,
            }],
            directors: vec!["Robert Zemeckis".to_string()],
        })
    }

    async fn watch_providers(&self, movie_id: u64) -> AppResult<WatchProviders> {
        if movie_id == 2 {
            return Err(AppError::ExternalApi("lookup failed".to_string()));
        }
        Ok(WatchProviders {
            streaming: vec!["Netflix".to_string()],
            rent: vec!["Apple TV".to_string()],
            buy: vec![],
            free: vec!["Tubi TV".to_string()],
            link: Some(format!("https://www.themoviedb.org/movie/{}/watch", movie_id)),
        })
    }

    fn clone_for_task(&self) -> Box<dyn MovieProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn test_state() -> AppState {
    AppState::new(
        QuestionBank::default(),
        Arc::new(StubProvider),
        RecommendationSettings {
            limit: 2,
            min_vote_average: 6.0,
        },
    )
}

fn create_test_server() -> TestServer {
    TestServer::new(create_router(Arc::new(test_state()))).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_get_questions() {
    let server = create_test_server();
    let response = server.get("/api/v1/quiz/questions").await;
    response.assert_status_ok();

    let questions: Vec<Value> = response.json();
    assert_eq!(questions.len(), 8);
    assert_eq!(questions[1]["type"], "scale");
    assert_eq!(questions[1]["weight"], 0.25);
    assert_eq!(questions[3]["type"], "choice");
    assert_eq!(questions[3]["options"][0]["key"], "escape");
}

#[tokio::test]
async fn test_score_single_scale_answer() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/mood/score")
        .json(&json!({ "answers": { "1": { "value": 5 } } }))
        .await;
    response.assert_status_ok();

    let result: Value = response.json();
    assert_eq!(result["mood"], "happy");
    assert_eq!(result["confidence"], 100);
    assert_eq!(result["scores"]["happy"], 0.25);
    assert_eq!(result["scores"]["sad"], 0.0);
}

#[tokio::test]
async fn test_score_tie_and_option_resolution() {
    let server = create_test_server();
    // Q4 "reflect" gives calm and contemplative equal weight
    let response = server
        .post("/api/v1/mood/score")
        .json(&json!({ "answers": { "3": { "option": "reflect" } } }))
        .await;
    response.assert_status_ok();

    let result: Value = response.json();
    assert_eq!(result["mood"], "calm");
    assert_eq!(result["confidence"], 50);
}

#[tokio::test]
async fn test_score_empty_answers() {
    let server = create_test_server();
    let response = server.post("/api/v1/mood/score").json(&json!({})).await;
    response.assert_status_ok();

    let result: Value = response.json();
    assert_eq!(result["mood"], "happy");
    assert_eq!(result["confidence"], 0);
}

#[tokio::test]
async fn test_score_ignores_unknown_and_malformed_answers() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/mood/score")
        .json(&json!({
            "answers": {
                "0": { "option": "escape" },
                "7": { "moods": ["sad", "bored"] },
                "42": { "value": 5 }
            }
        }))
        .await;
    response.assert_status_ok();

    let result: Value = response.json();
    assert_eq!(result["mood"], "sad");
    assert_eq!(result["confidence"], 100);
}

#[tokio::test]
async fn test_score_skips_unreadable_answers() {
    let server = create_test_server();
    let bad_answers = [
        json!({ "7": { "value": 2.5 } }),
        json!({ "7": {} }),
        json!({ "x": { "value": 3 } }),
        json!({ "7": "sad", "2": null }),
    ];

    for bad in bad_answers {
        let mut answers = bad.as_object().unwrap().clone();
        answers.insert("1".to_string(), json!({ "value": 5 }));

        let response = server
            .post("/api/v1/mood/score")
            .json(&json!({ "answers": answers }))
            .await;
        response.assert_status_ok();

        let result: Value = response.json();
        assert_eq!(result["mood"], "happy", "answers: {}", bad);
        assert_eq!(result["confidence"], 100, "answers: {}", bad);
    }
}

#[tokio::test]
async fn test_quick_mood() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/mood/quick")
        .json(&json!({ "mood": "excited" }))
        .await;
    response.assert_status_ok();

    let result: Value = response.json();
    assert_eq!(result, json!({ "mood": "excited", "confidence": 100 }));
}

#[tokio::test]
async fn test_quick_mood_unknown_label() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/mood/quick")
        .json(&json!({ "mood": "bored" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("bored"));
}

#[tokio::test]
async fn test_mood_genres() {
    let server = create_test_server();
    let response = server.get("/api/v1/moods/scared/genres").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["genre_ids"], json!([27, 53]));
    assert_eq!(body["genres"], json!(["Horror", "Thriller"]));

    server
        .get("/api/v1/moods/bored/genres")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_quiz_session_flow() {
    let server = create_test_server();

    let response = server.post("/api/v1/quiz/sessions").await;
    response.assert_status(StatusCode::CREATED);
    let session: Value = response.json();
    assert_eq!(session["mode"], "full");
    assert_eq!(session["status"], "in_progress");
    assert_eq!(session["current_question"], 0);
    assert_eq!(session["total"], 8);
    let id = session["id"].as_str().unwrap().to_string();
    let answers_path = format!("/api/v1/quiz/sessions/{}/answers", id);

    let answers = [
        json!({ "value": 2 }),
        json!({ "value": 1 }),
        json!({ "value": 2 }),
        json!({ "option": "reflect" }),
        json!({ "value": 3 }),
        json!({ "option": "alone" }),
        json!({ "value": 1 }),
        json!({ "option": "melancholy" }),
    ];

    let mut last = Value::Null;
    for (index, answer) in answers.iter().enumerate() {
        let response = server.post(&answers_path).json(answer).await;
        response.assert_status_ok();
        last = response.json();
        if index + 1 < answers.len() {
            assert_eq!(last["status"], "in_progress");
            assert_eq!(last["current_question"], index + 1);
        }
    }

    assert_eq!(last["status"], "complete");
    assert_eq!(last["answered"], 8);
    assert_eq!(last["result"]["mood"], "calm");

    // Further answers conflict with the finished session
    server
        .post(&answers_path)
        .json(&json!({ "value": 3 }))
        .await
        .assert_status(StatusCode::CONFLICT);

    // Reset starts over
    let response = server
        .post(&format!("/api/v1/quiz/sessions/{}/reset", id))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["status"], "in_progress");
    assert_eq!(session["current_question"], 0);
    assert_eq!(session["result"], Value::Null);
}

#[tokio::test]
async fn test_quick_quiz_session() {
    let server = create_test_server();

    let session: Value = server
        .post("/api/v1/quiz/sessions")
        .json(&json!({ "mode": "quick" }))
        .await
        .json();
    assert_eq!(session["total"], 1);
    let answers_path = format!("/api/v1/quiz/sessions/{}/answers", session["id"].as_str().unwrap());

    server
        .post(&answers_path)
        .json(&json!({ "value": 4 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post(&answers_path)
        .json(&json!({ "option": "romantic" }))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["status"], "complete");
    assert_eq!(session["result"], json!({ "mood": "romantic", "confidence": 100 }));
}

#[tokio::test]
async fn test_unreadable_session_answer_still_advances() {
    let server = create_test_server();
    let session: Value = server.post("/api/v1/quiz/sessions").await.json();
    let answers_path = format!("/api/v1/quiz/sessions/{}/answers", session["id"].as_str().unwrap());

    let response = server
        .post(&answers_path)
        .json(&json!({ "value": "high" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["current_question"], 1);
}

#[tokio::test]
async fn test_create_session_rejects_invalid_body() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/quiz/sessions")
        .json(&json!({ "mode": "bogus" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_expired_session_is_gone() {
    let state = test_state().with_session_ttl(chrono::Duration::zero());
    let server = TestServer::new(create_router(Arc::new(state))).unwrap();

    let session: Value = server.post("/api/v1/quiz/sessions").await.json();
    let path = format!("/api/v1/quiz/sessions/{}", session["id"].as_str().unwrap());
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    server
        .post(&format!("{}/answers", path))
        .json(&json!({ "value": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_lookup_and_delete() {
    let server = create_test_server();
    let session: Value = server.post("/api/v1/quiz/sessions").await.json();
    let path = format!("/api/v1/quiz/sessions/{}", session["id"].as_str().unwrap());

    server.get(&path).await.assert_status_ok();
    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session() {
    let server = create_test_server();
    let path = format!("/api/v1/quiz/sessions/{}/answers", uuid::Uuid::new_v4());
    server
        .post(&path)
        .json(&json!({ "value": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "scared")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["mood"], "scared");
    assert_eq!(body["genre_ids"], json!([27, 53]));

    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["title"], "Genre 27 pick 1");
    assert_eq!(movies[0]["providers"]["streaming"], json!(["Netflix"]));
    // Failed lookup leaves the movie without providers
    assert_eq!(movies[1]["providers"]["streaming"], json!([]));
}

#[tokio::test]
async fn test_recommendations_unknown_mood() {
    let server = create_test_server();
    server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "bored")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_details() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/13").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["title"], "Forrest Gump");
    assert_eq!(body["runtime"], 142);
    assert_eq!(body["cast"][0]["name"], "Tom Hanks");
    assert_eq!(body["directors"], json!(["Robert Zemeckis"]));

    let response = server.get("/api/v1/movies/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_movie_watch_providers() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/7/providers").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["streaming"], json!(["Netflix"]));
    assert_eq!(body["free"], json!(["Tubi TV"]));
    assert_eq!(body["link"], "https://www.themoviedb.org/movie/7/watch");

    // Unlike recommendations, the failure is reported
    server
        .get("/api/v1/movies/2/providers")
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
    server
        .get("/api/v1/movies/abc/providers")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
