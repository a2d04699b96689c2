//! Request-scoped value objects shared across the pipeline

use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;

/// How a speaker label was decided for a transcript span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerConfidence {
    /// A single diarization turn clearly dominated the span
    Exact,
    /// Resolved by heuristics or nearest-turn distance
    Inferred,
    /// Diarization was unavailable; the single-speaker fallback applied
    Fallback,
}

/// Word-level sub-timestamp, kept when the transcription engine supplies it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSpan {
    /// Word text
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

/// A time-aligned stretch of transcribed text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSpan {
    /// Transcribed text, non-empty after trimming
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Word-level timestamps, empty when the engine omits them
    pub words: Vec<WordSpan>,
}

impl TranscriptSpan {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One speaker turn from the diarization engine, canonically labeled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationInterval {
    /// Canonical speaker id ("SPEAKER_1", "SPEAKER_2", ...)
    pub speaker_id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl DiarizationInterval {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Normalized diarization output.
///
/// `degraded` marks the single-speaker fallback synthesized when the
/// diarization oracle failed or returned nothing; downstream labeling
/// reports `SpeakerConfidence::Fallback` in that case.
#[derive(Debug, Clone)]
pub struct Diarization {
    /// Speaker turns ordered by start, never empty
    pub intervals: Vec<DiarizationInterval>,
    /// Whether this is the synthesized fallback
    pub degraded: bool,
}

/// A transcript span with its assigned speaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSegment {
    /// Assigned speaker id
    pub speaker_id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Transcribed text
    pub text: String,
    /// How the label was decided
    pub confidence: SpeakerConfidence,
}

/// A maximal run of consecutive same-speaker segments.
///
/// This is the unit returned to API clients; field names are part of the
/// response contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker id ("SPEAKER_1", ...)
    pub speaker: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Space-joined text of the merged segments
    pub text: String,
}

/// Complete result of one transcription request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Speaker-labeled utterances in timeline order
    pub segments: Vec<Utterance>,
    /// All utterance texts joined into one transcript
    pub full_transcript: String,
    /// Language declared by the transcription engine
    pub language: String,
    /// Recording duration in seconds
    pub duration: f64,
}
