use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;
use voxscribe_diarization::{RemoteDiarizationOracle, TranscriptResult};

use crate::{error::ApiError, pipeline, state::AppState};

/// Transcribe an uploaded audio file with speaker diarization.
///
/// Multipart field: `file` (mp3, wav or ogg). Returns the full transcript,
/// speaker-labeled segments with timestamps, detected language and
/// duration.
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResult>, ApiError> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, content_type, data.to_vec()));
        }
    }

    let (filename, content_type, data) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing `file` field".to_string()))?;

    let allowed = &state.settings.upload.allowed_types;
    if !allowed.iter().any(|t| t == &content_type) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported file format. Supported formats: {}",
            allowed.join(", ")
        )));
    }

    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    let max_bytes = state.settings.upload.max_bytes;
    if data.len() > max_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "File too large. Maximum size: {} MB",
            max_bytes / 1024 / 1024
        )));
    }

    info!(%filename, %content_type, bytes = data.len(), "Transcription request");

    let result = match &state.diarization {
        Some(oracle) => {
            pipeline::transcribe_with_speakers(
                &*state.transcription,
                Some(&**oracle),
                data,
                &filename,
                &state.labeling,
            )
            .await?
        }
        None => {
            pipeline::transcribe_with_speakers::<_, RemoteDiarizationOracle>(
                &*state.transcription,
                None,
                data,
                &filename,
                &state.labeling,
            )
            .await?
        }
    };

    Ok(Json(result))
}
