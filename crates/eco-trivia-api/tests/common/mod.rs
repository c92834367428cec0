//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eco_trivia_core::rng::DeterministicRng;
use eco_trivia_test_support::{RecordingRecordStore, SequenceRng, sample_trivia};
use http_body_util::BodyExt;
use tower::ServiceExt;

use eco_trivia_api::state::{AppState, TriviaStore};

/// Build the full app router over `store` with a scripted RNG. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app(store: Arc<TriviaStore>, rng: SequenceRng) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    eco_trivia_api::app(AppState::new(store, rng))
}

/// Build the full app router over the five-record sample table.
pub fn build_sample_app(samples: Vec<f64>) -> Router {
    build_test_app(
        Arc::new(RecordingRecordStore::new(sample_trivia())),
        SequenceRng::new(samples),
    )
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
