//! Request pipeline: oracles -> normalizers -> labeling engine -> assembler
//!
//! Transcription failure is fatal (there is no fallback transcript
//! source); diarization failure is absorbed by the normalizer and degrades
//! the result to single-speaker output. Once both oracle results are in,
//! the merge path is pure and runs to completion.

use tracing::debug;
use voxscribe_asr::{canonicalize, AsrError, TranscriptionOracle};
use voxscribe_diarization::{
    assemble, assign_speakers, normalize, DiarizationError, DiarizationOracle, LabelingConfig,
    TranscriptResult,
};

pub async fn transcribe_with_speakers<T, D>(
    transcription: &T,
    diarization: Option<&D>,
    audio: Vec<u8>,
    filename: &str,
    labeling: &LabelingConfig,
) -> Result<TranscriptResult, AsrError>
where
    T: TranscriptionOracle + Sync,
    D: DiarizationOracle + Sync,
{
    // Both oracle calls run concurrently; they share nothing
    let (transcript_outcome, diarization_outcome) = match diarization {
        Some(oracle) => {
            let diarization_audio = audio.clone();
            tokio::join!(
                transcription.transcribe(audio, filename),
                oracle.diarize(diarization_audio)
            )
        }
        None => (
            transcription.transcribe(audio, filename).await,
            Err(DiarizationError::EndpointNotConfigured),
        ),
    };

    let raw_transcript = transcript_outcome?;
    let language = raw_transcript.language.clone();
    let reported_duration = raw_transcript.duration;

    let spans = canonicalize(raw_transcript)?;
    let duration = reported_duration
        .unwrap_or_else(|| spans.last().map(|s| s.end).unwrap_or(0.0));

    let diarization = normalize(diarization_outcome, duration);
    debug!(
        spans = spans.len(),
        turns = diarization.intervals.len(),
        degraded = diarization.degraded,
        "Merging transcript with diarization"
    );

    let labeled = assign_speakers(&spans, &diarization, labeling);
    Ok(assemble(&labeled, &language, reported_duration))
}
