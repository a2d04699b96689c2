use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use voxscribe_asr::AsrError;
use voxscribe_llm::LlmError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    /// No usable speech found after transcript cleanup; a distinct
    /// condition from an oracle failure
    NoSpeechDetected,
    /// The transcription or title oracle failed; fatal to the request
    UpstreamFailure(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg)
            }
            ApiError::NoSpeechDetected => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "no_speech_detected",
                "No speech detected in audio".to_string(),
            ),
            ApiError::UpstreamFailure(msg) => (StatusCode::BAD_GATEWAY, "upstream_failure", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AsrError> for ApiError {
    fn from(err: AsrError) -> Self {
        match err {
            AsrError::NoSpeechDetected => ApiError::NoSpeechDetected,
            AsrError::ApiKeyMissing => ApiError::Internal(err.to_string()),
            other => ApiError::UpstreamFailure(other.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ApiKeyMissing => ApiError::Internal(err.to_string()),
            other => ApiError::UpstreamFailure(other.to_string()),
        }
    }
}
