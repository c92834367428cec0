//! Routes for the trivia catalog.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::{info, instrument};
use uuid::Uuid;

use eco_trivia_catalog::application::query_handlers;
use eco_trivia_core::trivia::RandomTriviaResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /random
#[instrument(skip(state), fields(correlation_id = %Uuid::new_v4()))]
async fn get_random_trivia(
    State(state): State<AppState>,
) -> Result<Json<RandomTriviaResponse>, ApiError> {
    let response = query_handlers::get_random_trivia(&state.trivia_selector).await?;

    info!(trivia_id = response.trivia.id, "served random trivia");

    Ok(Json(response))
}

/// Returns the router for the trivia context.
pub fn router() -> Router<AppState> {
    Router::new().route("/random", get(get_random_trivia))
}
