use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use voxscribe_llm::TitleOracle;

use crate::{error::ApiError, state::AppState};

/// Titles need enough content to work with
const MIN_CONTENT_CHARS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct TitleSuggestionRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TitleSuggestionResponse {
    pub suggestions: Vec<String>,
}

/// Generate AI-powered title suggestions for a blog post
pub async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<TitleSuggestionRequest>,
) -> Result<Json<TitleSuggestionResponse>, ApiError> {
    if request.content.chars().count() < MIN_CONTENT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Blog content is too short. Please provide at least {MIN_CONTENT_CHARS} characters."
        )));
    }

    info!(chars = request.content.len(), "Title suggestion request");

    let suggestions = state.titles.suggest_titles(&request.content).await?;

    Ok(Json(TitleSuggestionResponse { suggestions }))
}
