pub mod titles;
pub mod transcription;

use axum::Json;

/// Root endpoint to check that the API is running
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the voxscribe API. POST /api/transcribe or /api/title-suggestions."
    }))
}
