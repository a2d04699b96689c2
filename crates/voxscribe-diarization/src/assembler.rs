//! Fold labeled segments into speaker utterances
//!
//! Pure final stage of the pipeline: no heuristics, no time-gap rules.
//! Adjacency plus label equality is the whole merge criterion, so a long
//! same-speaker pause stays one utterance while a one-word interjection
//! from another speaker always splits it.

use voxscribe_core::{LabeledSegment, TranscriptResult, Utterance};

/// Merge consecutive same-speaker segments into utterances and build the
/// complete response object.
///
/// `recording_duration` (from the transcription engine) takes precedence
/// over the span-derived duration when supplied.
pub fn assemble(
    labeled: &[LabeledSegment],
    language: &str,
    recording_duration: Option<f64>,
) -> TranscriptResult {
    let mut utterances: Vec<Utterance> = Vec::new();

    for segment in labeled {
        match utterances.last_mut() {
            Some(last) if last.speaker == segment.speaker_id => {
                last.text.push(' ');
                last.text.push_str(segment.text.trim());
                last.end = segment.end;
            }
            _ => utterances.push(Utterance {
                speaker: segment.speaker_id.clone(),
                start: segment.start,
                end: segment.end,
                text: segment.text.trim().to_string(),
            }),
        }
    }

    let full_transcript = utterances
        .iter()
        .map(|u| u.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let duration = recording_duration.unwrap_or_else(|| match (labeled.first(), labeled.last()) {
        (Some(first), Some(last)) => last.end - first.start,
        _ => 0.0,
    });

    TranscriptResult {
        segments: utterances,
        full_transcript,
        language: language.to_string(),
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxscribe_core::SpeakerConfidence;

    fn seg(speaker: &str, start: f64, end: f64, text: &str) -> LabeledSegment {
        LabeledSegment {
            speaker_id: speaker.to_string(),
            start,
            end,
            text: text.to_string(),
            confidence: SpeakerConfidence::Exact,
        }
    }

    #[test]
    fn test_merges_adjacent_same_speaker() {
        let labeled = vec![
            seg("SPEAKER_1", 0.0, 2.0, "Hello there,"),
            seg("SPEAKER_1", 2.0, 4.0, "how are you?"),
            seg("SPEAKER_2", 4.0, 6.0, "I'm well."),
        ];

        let result = assemble(&labeled, "en", None);

        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].speaker, "SPEAKER_1");
        assert_eq!(result.segments[0].text, "Hello there, how are you?");
        assert_eq!(result.segments[0].start, 0.0);
        assert_eq!(result.segments[0].end, 4.0);
        assert_eq!(result.segments[1].speaker, "SPEAKER_2");
        assert_eq!(result.full_transcript, "Hello there, how are you? I'm well.");
    }

    #[test]
    fn test_pause_does_not_split_same_speaker() {
        let labeled = vec![
            seg("SPEAKER_1", 0.0, 2.0, "First thought."),
            // multi-second pause, still the same speaker
            seg("SPEAKER_1", 8.0, 10.0, "Second thought."),
        ];

        let result = assemble(&labeled, "en", None);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].end, 10.0);
    }

    #[test]
    fn test_interjection_always_splits() {
        let labeled = vec![
            seg("SPEAKER_1", 0.0, 4.0, "long turn A"),
            seg("SPEAKER_2", 4.0, 4.3, "mm-hm"),
            seg("SPEAKER_1", 4.3, 8.0, "long turn B"),
        ];

        let result = assemble(&labeled, "en", None);
        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.segments[1].speaker, "SPEAKER_2");
    }

    #[test]
    fn test_recording_duration_takes_precedence() {
        let labeled = vec![seg("SPEAKER_1", 1.0, 3.0, "short")];

        let derived = assemble(&labeled, "en", None);
        assert!((derived.duration - 2.0).abs() < 1e-9);

        let supplied = assemble(&labeled, "en", Some(10.5));
        assert!((supplied.duration - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_language_passed_through() {
        let result = assemble(&[seg("SPEAKER_1", 0.0, 1.0, "hola")], "spanish", None);
        assert_eq!(result.language, "spanish");
    }

    #[test]
    fn test_empty_input() {
        let result = assemble(&[], "en", None);
        assert!(result.segments.is_empty());
        assert_eq!(result.full_transcript, "");
        assert_eq!(result.duration, 0.0);
    }
}
