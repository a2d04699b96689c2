//! ASR error types

use thiserror::Error;

/// ASR-related errors
#[derive(Error, Debug)]
pub enum AsrError {
    /// API key not configured
    #[error("Transcription API key not configured")]
    ApiKeyMissing,

    /// API request failed
    #[error("Transcription request failed: {0}")]
    RequestFailed(String),

    /// Invalid response from API
    #[error("Invalid transcription response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Timeout
    #[error("Transcription request timed out")]
    Timeout,

    /// No usable speech left after cleanup
    #[error("No speech detected in audio")]
    NoSpeechDetected,
}

impl From<reqwest::Error> for AsrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AsrError::Timeout
        } else if err.is_connect() {
            AsrError::ConnectionError(err.to_string())
        } else {
            AsrError::RequestFailed(err.to_string())
        }
    }
}
