//! Diarization oracle trait and the hosted endpoint implementation

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::DiarizationError;

/// One speaker turn as returned by the diarization engine
#[derive(Debug, Clone, Deserialize)]
pub struct RawTurn {
    /// Engine-native speaker label (canonicalized by the normalizer)
    #[serde(alias = "label", alias = "speaker_id")]
    pub speaker: String,
    pub start: f64,
    pub end: f64,
}

/// Untreated diarization oracle output
#[derive(Debug, Clone, Default)]
pub struct RawDiarization {
    pub turns: Vec<RawTurn>,
}

/// Capability interface for the diarization oracle.
///
/// Never authoritative for text. Any error from an implementation is
/// absorbed by the normalizer, so a failing oracle degrades a request to
/// single-speaker output instead of failing it.
#[trait_variant::make(DiarizationOracle: Send)]
pub trait LocalDiarizationOracle {
    /// Partition the audio into speaker turns
    async fn diarize(&self, audio: Vec<u8>) -> Result<RawDiarization, DiarizationError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Hosted diarization oracle posting audio bytes to an HTTPS endpoint
/// (a pyannote-style inference service).
pub struct RemoteDiarizationOracle {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl RemoteDiarizationOracle {
    pub fn new(endpoint: String, api_key: Option<SecretString>, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl DiarizationOracle for RemoteDiarizationOracle {
    async fn diarize(&self, audio: Vec<u8>) -> Result<RawDiarization, DiarizationError> {
        info!(endpoint = %self.endpoint, bytes = audio.len(), "Starting diarization");

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/octet-stream")
            .timeout(self.timeout)
            .body(audio);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Diarization endpoint error: {} - {}", status, error_text);
            return Err(DiarizationError::RequestFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let body: DiarizationBody = response
            .json()
            .await
            .map_err(|e| DiarizationError::InvalidResponse(e.to_string()))?;

        let turns = body.into_turns();
        debug!(turns = turns.len(), "Diarization completed");

        Ok(RawDiarization { turns })
    }

    fn name(&self) -> &'static str {
        "remote-diarization"
    }
}

/// Endpoint response body; some services return a bare array, others wrap
/// it in a `segments` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DiarizationBody {
    Wrapped { segments: Vec<RawTurn> },
    Flat(Vec<RawTurn>),
}

impl DiarizationBody {
    fn into_turns(self) -> Vec<RawTurn> {
        match self {
            DiarizationBody::Wrapped { segments } => segments,
            DiarizationBody::Flat(turns) => turns,
        }
    }
}
