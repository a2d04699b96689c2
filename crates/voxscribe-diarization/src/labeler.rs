//! Speaker assignment engine
//!
//! Reconciles two imperfectly-aligned sequences - transcript spans and
//! diarization turns - into one speaker label per span. Ambiguous overlaps
//! (crosstalk, interjections, boundary mismatches) are resolved by an
//! ordered chain of named rules; every span always gets exactly one label,
//! deterministically.

use serde::{Deserialize, Serialize};
use tracing::debug;
use voxscribe_core::{
    nearest_interval, Diarization, DiarizationInterval, LabeledSegment, SpeakerConfidence,
    TimeInterval, TranscriptSpan,
};

/// Tunable thresholds for speaker assignment.
///
/// Lowering `high_overlap` increases sensitivity to crosstalk reassignment;
/// raising `brief_utterance_secs` treats more utterances as backchannel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Overlap fraction above which a lone candidate wins outright
    pub high_overlap: f64,
    /// Overlap fraction below which competing candidates are ignored;
    /// doubles as the near-tie margin for the continuity rule
    pub low_overlap: f64,
    /// Spans shorter than this are candidate backchannels (seconds)
    pub brief_utterance_secs: f64,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            high_overlap: 0.6,
            low_overlap: 0.2,
            brief_utterance_secs: 0.8,
        }
    }
}

/// Assign a speaker to every transcript span.
///
/// Returns exactly one `LabeledSegment` per input span, in input order,
/// with start/end/text carried over unchanged. `diarization.intervals`
/// must be non-empty, which the normalizer guarantees.
pub fn assign_speakers(
    spans: &[TranscriptSpan],
    diarization: &Diarization,
    config: &LabelingConfig,
) -> Vec<LabeledSegment> {
    if diarization.degraded || diarization.intervals.is_empty() {
        // Single-speaker fallback: every span trivially gets that speaker
        let speaker = diarization
            .intervals
            .first()
            .map(|i| i.speaker_id.clone())
            .unwrap_or_else(|| "SPEAKER_1".to_string());
        return spans
            .iter()
            .map(|s| labeled(s, speaker.clone(), SpeakerConfidence::Fallback))
            .collect();
    }

    let mut out: Vec<LabeledSegment> = Vec::with_capacity(spans.len());

    for (idx, span) in spans.iter().enumerate() {
        let candidates = overlap_candidates(span, &diarization.intervals);

        let segment = if candidates.is_empty() {
            // Timing gap: no turn intersects the span at all
            let speaker = nearest_speaker(span, &diarization.intervals);
            labeled(span, speaker, SpeakerConfidence::Inferred)
        } else if is_exact_match(&candidates, config) {
            labeled(span, candidates[0].speaker.clone(), SpeakerConfidence::Exact)
        } else {
            let ctx = RuleContext {
                span,
                candidates: &candidates,
                prev: out.last(),
                next: spans.get(idx + 1),
                intervals: &diarization.intervals,
                config,
            };
            labeled(span, resolve_conflict(&ctx), SpeakerConfidence::Inferred)
        };

        out.push(segment);
    }

    out
}

fn labeled(span: &TranscriptSpan, speaker_id: String, confidence: SpeakerConfidence) -> LabeledSegment {
    LabeledSegment {
        speaker_id,
        start: span.start,
        end: span.end,
        text: span.text.clone(),
        confidence,
    }
}

/// A speaker competing for a span, with the fraction of the span it covers
#[derive(Debug, Clone)]
struct Candidate {
    speaker: String,
    fraction: f64,
}

/// Per-speaker coverage of a span, sorted by fraction descending.
///
/// A speaker may hold several turns across one span (crosstalk around a
/// boundary); their fractions are summed. The sort is stable over timeline
/// encounter order, so equal fractions resolve deterministically.
fn overlap_candidates(span: &TranscriptSpan, intervals: &[DiarizationInterval]) -> Vec<Candidate> {
    let span_iv = span.interval();
    let mut candidates: Vec<Candidate> = Vec::new();

    for turn in intervals {
        let fraction = span_iv.overlap_fraction(&turn.interval());
        if fraction <= 0.0 {
            continue;
        }
        match candidates.iter_mut().find(|c| c.speaker == turn.speaker_id) {
            Some(c) => c.fraction = (c.fraction + fraction).min(1.0),
            None => candidates.push(Candidate {
                speaker: turn.speaker_id.clone(),
                fraction,
            }),
        }
    }

    candidates.sort_by(|a, b| {
        b.fraction
            .partial_cmp(&a.fraction)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// One candidate clears the high threshold and every other sits below the
/// low threshold: an unambiguous assignment.
fn is_exact_match(candidates: &[Candidate], config: &LabelingConfig) -> bool {
    candidates[0].fraction >= config.high_overlap
        && candidates[1..].iter().all(|c| c.fraction < config.low_overlap)
}

fn nearest_speaker(span: &TranscriptSpan, intervals: &[DiarizationInterval]) -> String {
    let ivs: Vec<TimeInterval> = intervals.iter().map(|d| d.interval()).collect();
    // intervals is non-empty, so a nearest one always exists
    let idx = nearest_interval(span.interval().midpoint(), &ivs).unwrap_or(0);
    intervals[idx].speaker_id.clone()
}

/// Everything a conflict rule may consult
struct RuleContext<'a> {
    span: &'a TranscriptSpan,
    candidates: &'a [Candidate],
    prev: Option<&'a LabeledSegment>,
    next: Option<&'a TranscriptSpan>,
    intervals: &'a [DiarizationInterval],
    config: &'a LabelingConfig,
}

type Rule = for<'a> fn(&RuleContext<'a>) -> Option<String>;

/// Prioritized rule chain: each rule returns a decision or no opinion,
/// falling through to the next; the final fallthrough is plurality overlap.
const RULES: &[(&str, Rule)] = &[
    ("short_span", short_span_rule),
    ("hesitation_handoff", hesitation_handoff_rule),
    ("continuity", continuity_rule),
];

fn resolve_conflict(ctx: &RuleContext) -> String {
    for &(name, rule) in RULES {
        if let Some(speaker) = rule(ctx) {
            debug!(rule = name, speaker = %speaker, start = ctx.span.start, "Conflict resolved");
            return speaker;
        }
    }
    // Plurality: strictly greatest overlap fraction
    ctx.candidates[0].speaker.clone()
}

/// Brief span fully inside a longer surrounding turn is likely a
/// backchannel; keep the surrounding speaker. Exception: when it
/// immediately precedes a long run by another speaker it reads as an
/// interruption, so the turn goes to that speaker instead.
fn short_span_rule(ctx: &RuleContext) -> Option<String> {
    if ctx.span.duration() >= ctx.config.brief_utterance_secs {
        return None;
    }

    let surrounding = ctx.intervals.iter().find(|t| {
        t.start <= ctx.span.start && t.end >= ctx.span.end && t.duration() > ctx.span.duration()
    })?;

    if let Some(next) = ctx.next {
        if next.duration() >= ctx.config.brief_utterance_secs * 2.0 {
            if let Some(next_speaker) = dominant_speaker(next, ctx.intervals) {
                if next_speaker != surrounding.speaker_id
                    && ctx.candidates.iter().any(|c| c.speaker == next_speaker)
                {
                    return Some(next_speaker);
                }
            }
        }
    }

    Some(surrounding.speaker_id.clone())
}

/// The previous segment trailed off (ellipsis or a repeated final word)
/// and this short span completes the thought: conversations hand the turn
/// to the other voice at that point.
fn hesitation_handoff_rule(ctx: &RuleContext) -> Option<String> {
    let prev = ctx.prev?;
    if !ends_with_hesitation(&prev.text) {
        return None;
    }

    let completes = ctx.span.text.split_whitespace().count() <= 4
        || starts_with_last_word_of(&ctx.span.text, &prev.text);
    if !completes {
        return None;
    }

    ctx.candidates
        .iter()
        .find(|c| c.speaker != prev.speaker_id)
        .map(|c| c.speaker.clone())
}

/// Near-tie between candidates: prefer the previous segment's speaker to
/// avoid spurious speaker flapping on ambiguous boundaries.
fn continuity_rule(ctx: &RuleContext) -> Option<String> {
    let prev = ctx.prev?;
    let top = ctx.candidates.first()?;
    ctx.candidates
        .iter()
        .filter(|c| top.fraction - c.fraction <= ctx.config.low_overlap)
        .find(|c| c.speaker == prev.speaker_id)
        .map(|c| c.speaker.clone())
}

/// Speaker with the greatest coverage of a span, if any turn intersects it
fn dominant_speaker(span: &TranscriptSpan, intervals: &[DiarizationInterval]) -> Option<String> {
    overlap_candidates(span, intervals)
        .first()
        .map(|c| c.speaker.clone())
}

fn ends_with_hesitation(text: &str) -> bool {
    let trimmed = text.trim_end();
    if trimmed.ends_with("...") || trimmed.ends_with('…') {
        return true;
    }
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }
    let strip = |w: &str| {
        w.trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    };
    let last = strip(words[words.len() - 1]);
    !last.is_empty() && last == strip(words[words.len() - 2])
}

fn starts_with_last_word_of(current: &str, prev: &str) -> bool {
    let last = prev
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .last()
        .unwrap_or("");
    !last.is_empty()
        && current
            .trim_start()
            .to_lowercase()
            .starts_with(&last.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: f64, end: f64, text: &str) -> TranscriptSpan {
        TranscriptSpan {
            text: text.to_string(),
            start,
            end,
            words: vec![],
        }
    }

    fn turn(speaker: &str, start: f64, end: f64) -> DiarizationInterval {
        DiarizationInterval {
            speaker_id: speaker.to_string(),
            start,
            end,
        }
    }

    fn diarization(intervals: Vec<DiarizationInterval>) -> Diarization {
        Diarization {
            intervals,
            degraded: false,
        }
    }

    #[test]
    fn test_clean_alternation() {
        let spans = vec![span(0.0, 2.5, "Hello"), span(3.0, 5.5, "I'm well")];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 2.6), turn("SPEAKER_2", 2.6, 6.0)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[0].speaker_id, "SPEAKER_1");
        assert_eq!(labeled[0].confidence, SpeakerConfidence::Exact);
        assert_eq!(labeled[1].speaker_id, "SPEAKER_2");
        assert_eq!(labeled[1].confidence, SpeakerConfidence::Exact);
        // text and timing carried over unchanged
        assert_eq!(labeled[0].text, "Hello");
        assert_eq!(labeled[1].start, 3.0);
    }

    #[test]
    fn test_backchannel_keeps_surrounding_speaker() {
        // Brief "mm-hm" blip fully inside SPEAKER_1's turn context
        let spans = vec![
            span(0.0, 4.0, "so I was thinking we should ship it"),
            span(4.0, 4.3, "mm-hm"),
            span(4.3, 8.0, "and then review the numbers after"),
        ];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 4.3), turn("SPEAKER_2", 4.0, 4.3)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled[1].speaker_id, "SPEAKER_1");
        assert_eq!(labeled[1].confidence, SpeakerConfidence::Inferred);
    }

    #[test]
    fn test_interruption_goes_to_interrupting_speaker() {
        // Short crosstalk span followed by a long run from the other
        // speaker reads as an interruption, not a backchannel.
        let spans = vec![
            span(0.0, 4.0, "so the plan was to"),
            span(4.0, 4.5, "wait"),
            span(4.5, 9.0, "before you go on, there is a problem with that"),
        ];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 4.5), turn("SPEAKER_2", 4.0, 9.0)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled[1].speaker_id, "SPEAKER_2");
        assert_eq!(labeled[2].speaker_id, "SPEAKER_2");
    }

    #[test]
    fn test_hesitation_handoff() {
        // SPEAKER_1 trails off, SPEAKER_2 completes the thought while both
        // turns blanket the boundary region.
        let spans = vec![
            span(0.0, 3.0, "and the result was..."),
            span(3.0, 4.2, "a disaster"),
        ];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 4.2), turn("SPEAKER_2", 3.0, 4.2)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled[0].speaker_id, "SPEAKER_1");
        assert_eq!(labeled[1].speaker_id, "SPEAKER_2");
    }

    #[test]
    fn test_boundary_tie_resolved_by_continuity() {
        // Span straddles two turns with equal overlap; previous segment's
        // speaker wins, no error raised.
        let spans = vec![span(0.0, 1.8, "first part"), span(1.0, 3.0, "straddling part")];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 2.0), turn("SPEAKER_2", 2.0, 4.0)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled[0].speaker_id, "SPEAKER_1");
        assert_eq!(labeled[1].speaker_id, "SPEAKER_1");
        assert_eq!(labeled[1].confidence, SpeakerConfidence::Inferred);
    }

    #[test]
    fn test_gap_assigned_to_nearest_turn() {
        let spans = vec![span(5.0, 6.0, "late remark")];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 2.0), turn("SPEAKER_2", 4.0, 4.8)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled[0].speaker_id, "SPEAKER_2");
        assert_eq!(labeled[0].confidence, SpeakerConfidence::Inferred);
    }

    #[test]
    fn test_degraded_diarization_labels_everything_fallback() {
        let spans = vec![span(0.0, 2.0, "one"), span(2.0, 4.0, "two")];
        let d = Diarization {
            intervals: vec![turn("SPEAKER_1", 0.0, 4.0)],
            degraded: true,
        };

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert!(labeled
            .iter()
            .all(|s| s.speaker_id == "SPEAKER_1" && s.confidence == SpeakerConfidence::Fallback));
    }

    #[test]
    fn test_one_label_per_span_in_order() {
        let spans: Vec<TranscriptSpan> = (0..10)
            .map(|i| span(i as f64, i as f64 + 1.0, "word"))
            .collect();
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 5.0), turn("SPEAKER_2", 5.0, 10.0)]);

        let labeled = assign_speakers(&spans, &d, &LabelingConfig::default());

        assert_eq!(labeled.len(), spans.len());
        for (s, l) in spans.iter().zip(&labeled) {
            assert_eq!(s.start, l.start);
            assert_eq!(s.end, l.end);
            assert_eq!(s.text, l.text);
        }
    }

    #[test]
    fn test_idempotent() {
        let spans = vec![
            span(0.0, 1.5, "alpha"),
            span(1.5, 1.9, "yeah"),
            span(1.9, 5.0, "beta gamma delta"),
        ];
        let d = diarization(vec![
            turn("SPEAKER_1", 0.0, 2.0),
            turn("SPEAKER_2", 1.4, 5.0),
        ]);

        let config = LabelingConfig::default();
        let first = assign_speakers(&spans, &d, &config);
        let second = assign_speakers(&spans, &d, &config);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.speaker_id, b.speaker_id);
            assert_eq!(a.confidence, b.confidence);
        }
    }

    #[test]
    fn test_ends_with_hesitation() {
        assert!(ends_with_hesitation("I was going to..."));
        assert!(ends_with_hesitation("we need the the"));
        assert!(!ends_with_hesitation("a normal sentence."));
        assert!(!ends_with_hesitation("the"));
    }

    #[test]
    fn test_thresholds_are_tunable() {
        // Raising the brief-utterance threshold makes a 2s crosstalk span
        // eligible for interruption handling; with the default threshold
        // the same span resolves by continuity instead.
        let spans = vec![
            span(0.0, 4.0, "so the plan is"),
            span(4.0, 6.0, "hold on hold on"),
            span(6.0, 11.0, "let me stop you right there for a second"),
        ];
        let d = diarization(vec![turn("SPEAKER_1", 0.0, 6.0), turn("SPEAKER_2", 4.0, 11.0)]);

        let default = assign_speakers(&spans, &d, &LabelingConfig::default());
        let relaxed = assign_speakers(
            &spans,
            &d,
            &LabelingConfig {
                brief_utterance_secs: 2.5,
                ..LabelingConfig::default()
            },
        );

        assert_eq!(default[1].speaker_id, "SPEAKER_1");
        assert_eq!(relaxed[1].speaker_id, "SPEAKER_2");
    }
}
