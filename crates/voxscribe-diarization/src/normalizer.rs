//! Normalize raw diarization output, absorbing oracle failures
//!
//! Downstream components always receive at least one interval covering the
//! whole timeline: when the oracle errors, times out or returns nothing,
//! the request degrades to single-speaker output rather than failing.

use tracing::warn;
use voxscribe_core::{Diarization, DiarizationInterval};

use crate::error::DiarizationError;
use crate::provider::RawDiarization;

/// Speaker id used by the synthesized single-speaker fallback
pub const FALLBACK_SPEAKER: &str = "SPEAKER_1";

/// Canonicalize a diarization outcome into an ordered, non-empty sequence
/// of speaker turns.
///
/// On success, engine-native labels become `SPEAKER_1..N` in order of first
/// appearance on the timeline. On any error or empty result, a single
/// interval spanning the recording is synthesized and flagged `degraded`.
pub fn normalize(
    outcome: Result<RawDiarization, DiarizationError>,
    duration: f64,
) -> Diarization {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Diarization unavailable, falling back to single speaker: {e}");
            return fallback(duration);
        }
    };

    let mut turns: Vec<_> = raw
        .turns
        .into_iter()
        .filter_map(|t| {
            let start = t.start.max(0.0);
            let end = t.end;
            if end > start {
                Some((t.speaker, start, end))
            } else {
                None
            }
        })
        .collect();

    if turns.is_empty() {
        warn!("Diarization returned no usable turns, falling back to single speaker");
        return fallback(duration);
    }

    turns.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    // Canonical ids in order of first appearance on the timeline
    let mut seen: Vec<String> = Vec::new();
    let intervals = turns
        .into_iter()
        .map(|(label, start, end)| {
            let idx = match seen.iter().position(|s| *s == label) {
                Some(idx) => idx,
                None => {
                    seen.push(label);
                    seen.len() - 1
                }
            };
            DiarizationInterval {
                speaker_id: format!("SPEAKER_{}", idx + 1),
                start,
                end,
            }
        })
        .collect();

    Diarization {
        intervals,
        degraded: false,
    }
}

fn fallback(duration: f64) -> Diarization {
    Diarization {
        intervals: vec![DiarizationInterval {
            speaker_id: FALLBACK_SPEAKER.to_string(),
            start: 0.0,
            end: duration.max(0.0),
        }],
        degraded: true,
    }
}
