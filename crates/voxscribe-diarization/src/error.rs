//! Diarization error types
//!
//! Every variant here is recoverable: the normalizer absorbs any of them
//! into the single-speaker fallback instead of failing the request.

use thiserror::Error;

/// Diarization-related errors
#[derive(Error, Debug)]
pub enum DiarizationError {
    /// No endpoint configured for the hosted oracle
    #[error("Diarization endpoint not configured")]
    EndpointNotConfigured,

    /// API request failed
    #[error("Diarization request failed: {0}")]
    RequestFailed(String),

    /// Invalid response from the endpoint
    #[error("Invalid diarization response: {0}")]
    InvalidResponse(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Timeout
    #[error("Diarization request timed out")]
    Timeout,
}

impl From<reqwest::Error> for DiarizationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DiarizationError::Timeout
        } else if err.is_connect() {
            DiarizationError::ConnectionError(err.to_string())
        } else {
            DiarizationError::RequestFailed(err.to_string())
        }
    }
}
