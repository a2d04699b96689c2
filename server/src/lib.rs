pub mod error;
pub mod pipeline;
pub mod routes;
pub mod settings;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Slack on top of the upload cap for multipart framing; the route
    // itself enforces the exact per-file limit.
    let body_limit = state.settings.upload.max_bytes + 64 * 1024;

    Router::new()
        .route("/", get(routes::root))
        .route("/api/transcribe", post(routes::transcription::transcribe))
        .route("/api/title-suggestions", post(routes::titles::suggest))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
