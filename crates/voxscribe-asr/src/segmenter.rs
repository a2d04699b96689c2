//! Canonicalize raw transcription output into ordered, non-overlapping spans

use tracing::debug;
use voxscribe_core::{TranscriptSpan, WordSpan};

use crate::error::AsrError;
use crate::provider::RawTranscript;

/// Turn raw oracle output into validated transcript spans.
///
/// The engine guarantees monotonic non-overlapping output; the re-sort and
/// overlap clipping here only fire when that guarantee is violated. Fails
/// with `NoSpeechDetected` when nothing usable is left.
pub fn canonicalize(raw: RawTranscript) -> Result<Vec<TranscriptSpan>, AsrError> {
    let mut spans: Vec<TranscriptSpan> = raw
        .spans
        .into_iter()
        .filter_map(|s| {
            let text = s.text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSpan {
                text,
                start: s.start.max(0.0),
                end: s.end.max(s.start.max(0.0)),
                words: s
                    .words
                    .into_iter()
                    .map(|w| WordSpan {
                        word: w.word.trim().to_string(),
                        start: w.start,
                        end: w.end,
                    })
                    .collect(),
            })
        })
        .collect();

    if spans.is_empty() {
        return Err(AsrError::NoSpeechDetected);
    }

    if !spans.windows(2).all(|w| w[0].start <= w[1].start) {
        debug!("Transcript spans out of order, re-sorting");
        spans.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));
    }

    // Clip any overlap by truncating the earlier span's end
    for i in 0..spans.len() - 1 {
        let next_start = spans[i + 1].start;
        if spans[i].end > next_start {
            debug!(
                clipped_end = spans[i].end,
                next_start, "Overlapping transcript spans, clipping"
            );
            spans[i].end = next_start;
            spans[i].words.retain(|w| w.start < next_start);
        }
    }

    Ok(spans)
}
