use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use voxscribe_diarization::LabelingConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub openai: OpenAiSettings,
    pub diarization: DiarizationSettings,
    pub labeling: LabelingConfig,
    pub upload: UploadSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub transcription_model: String,
    pub title_model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiarizationSettings {
    /// Hosted diarization endpoint; unset disables diarization entirely
    /// and every transcript degrades to single-speaker output
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("VOXSCRIBE"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000)?
            .set_default("openai.api_key", None::<String>)?
            .set_default("openai.transcription_model", "whisper-1")?
            .set_default("openai.title_model", "gpt-4o-mini")?
            .set_default("diarization.endpoint", None::<String>)?
            .set_default("diarization.api_key", None::<String>)?
            .set_default("diarization.timeout_secs", 60)?
            .set_default("labeling.high_overlap", 0.6)?
            .set_default("labeling.low_overlap", 0.2)?
            .set_default("labeling.brief_utterance_secs", 0.8)?
            .set_default("upload.max_bytes", 25 * 1024 * 1024)?
            .set_default(
                "upload.allowed_types",
                vec![
                    "audio/mpeg".to_string(),
                    "audio/mp3".to_string(),
                    "audio/wav".to_string(),
                    "audio/ogg".to_string(),
                ],
            )?
            .build()?;

        config.try_deserialize()
    }
}
