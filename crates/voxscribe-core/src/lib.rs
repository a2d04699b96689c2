//! voxscribe-core - shared types for the voxscribe transcription service
//!
//! Value objects exchanged between the oracle providers, the speaker
//! labeling engine and the HTTP layer, plus the time-interval primitives
//! every matching decision is built on.

pub mod interval;
pub mod types;

pub use interval::{distance_to_nearest, nearest_interval, TimeInterval};
pub use types::*;
