use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;
use voxscribe_asr::WhisperApiOracle;
use voxscribe_diarization::{LabelingConfig, RemoteDiarizationOracle};
use voxscribe_llm::OpenAiTitleProvider;

use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub transcription: Arc<WhisperApiOracle>,
    /// Absent when no diarization endpoint is configured; transcripts then
    /// degrade to single-speaker output instead of failing
    pub diarization: Option<Arc<RemoteDiarizationOracle>>,
    pub titles: Arc<OpenAiTitleProvider>,
    pub labeling: LabelingConfig,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let api_key = settings
            .openai
            .api_key
            .clone()
            .context("OpenAI API key not configured (set VOXSCRIBE_OPENAI__API_KEY)")?;

        let transcription = Arc::new(WhisperApiOracle::with_model(
            SecretString::new(api_key.clone()),
            &settings.openai.transcription_model,
        ));

        let titles = Arc::new(OpenAiTitleProvider::with_model(
            SecretString::new(api_key),
            &settings.openai.title_model,
        ));

        let diarization = settings.diarization.endpoint.clone().map(|endpoint| {
            Arc::new(RemoteDiarizationOracle::new(
                endpoint,
                settings
                    .diarization
                    .api_key
                    .clone()
                    .map(SecretString::new),
                settings.diarization.timeout_secs,
            ))
        });

        let labeling = settings.labeling.clone();

        Ok(Self {
            settings,
            transcription,
            diarization,
            titles,
            labeling,
        })
    }
}
