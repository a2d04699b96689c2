//! Speaker diarization module for voxscribe
//!
//! This module provides the diarization oracle abstraction, the normalizer
//! that absorbs oracle failures into a single-speaker fallback, the speaker
//! assignment engine that reconciles transcript spans with speaker turns,
//! and the assembler that folds labeled segments into utterances.

pub mod assembler;
pub mod error;
pub mod labeler;
pub mod normalizer;
pub mod provider;

pub use assembler::assemble;
pub use error::DiarizationError;
pub use labeler::{assign_speakers, LabelingConfig};
pub use normalizer::{normalize, FALLBACK_SPEAKER};
pub use provider::{DiarizationOracle, RawDiarization, RawTurn, RemoteDiarizationOracle};

// Re-export types from voxscribe-core
pub use voxscribe_core::{
    Diarization, DiarizationInterval, LabeledSegment, SpeakerConfidence, TranscriptResult,
    TranscriptSpan, Utterance,
};
