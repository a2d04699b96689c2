//! ASR (Automatic Speech Recognition) module for voxscribe
//!
//! This module provides the transcription oracle abstraction, a hosted
//! Whisper API implementation, and the segmenter that canonicalizes raw
//! oracle output into ordered, non-overlapping transcript spans.

pub mod error;
pub mod provider;
pub mod segmenter;

pub use error::AsrError;
pub use provider::{RawSpan, RawTranscript, RawWord, TranscriptionOracle, WhisperApiOracle};
pub use segmenter::canonicalize;

// Re-export types from voxscribe-core
pub use voxscribe_core::{TranscriptSpan, WordSpan};
