//! Transcription oracle trait and the hosted Whisper API implementation

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::AsrError;

const OPENAI_TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-1";

/// Word-level timestamp as returned by the engine
#[derive(Debug, Clone, Deserialize)]
pub struct RawWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// One timed text span as returned by the engine, before canonicalization
#[derive(Debug, Clone)]
pub struct RawSpan {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub words: Vec<RawWord>,
}

/// Untreated transcription oracle output.
///
/// Authoritative for text, timing and language; the segmenter turns this
/// into validated `TranscriptSpan`s.
#[derive(Debug, Clone)]
pub struct RawTranscript {
    pub spans: Vec<RawSpan>,
    pub language: String,
    /// Recording duration as declared by the engine, when available
    pub duration: Option<f64>,
}

/// Capability interface for the transcription oracle.
///
/// Implemented by the hosted Whisper provider and by deterministic stubs in
/// tests, so the merge pipeline can be exercised with zero network access.
#[trait_variant::make(TranscriptionOracle: Send)]
pub trait LocalTranscriptionOracle {
    /// Transcribe raw audio bytes into timed text spans
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<RawTranscript, AsrError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Hosted Whisper transcription oracle (OpenAI audio API)
pub struct WhisperApiOracle {
    client: Client,
    api_key: SecretString,
    model: String,
}

impl WhisperApiOracle {
    /// Create a new oracle with the default transcription model
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create with a custom model
    pub fn with_model(api_key: SecretString, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.to_string(),
        }
    }

    async fn send_request(
        &self,
        audio: Vec<u8>,
        filename: &str,
    ) -> Result<VerboseTranscription, AsrError> {
        let part = reqwest::multipart::Part::bytes(audio).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        debug!(model = %self.model, "Sending transcription request");

        let response = self
            .client
            .post(OPENAI_TRANSCRIPTION_URL)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AsrError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Transcription API error: {} - {}", status, error_text);
            return Err(AsrError::RequestFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AsrError::InvalidResponse(e.to_string()))
    }
}

impl TranscriptionOracle for WhisperApiOracle {
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<RawTranscript, AsrError> {
        info!(filename, bytes = audio.len(), "Starting transcription");

        let verbose = self.send_request(audio, filename).await?;
        let transcript = into_raw_transcript(verbose);

        info!(
            spans = transcript.spans.len(),
            language = %transcript.language,
            "Transcription completed"
        );
        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "whisper-api"
    }
}

/// Whisper `verbose_json` response body
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
}

fn into_raw_transcript(verbose: VerboseTranscription) -> RawTranscript {
    let words = verbose.words;
    let spans = verbose
        .segments
        .into_iter()
        .map(|seg| {
            // Word timestamps arrive as a flat list; attach each word to
            // the segment its midpoint falls into.
            let span_words = words
                .iter()
                .filter(|w| {
                    let mid = (w.start + w.end) / 2.0;
                    mid >= seg.start && mid < seg.end
                })
                .cloned()
                .collect();
            RawSpan {
                text: seg.text,
                start: seg.start,
                end: seg.end,
                words: span_words,
            }
        })
        .collect();

    RawTranscript {
        spans,
        language: verbose.language.unwrap_or_else(|| "en".to_string()),
        duration: verbose.duration,
    }
}
