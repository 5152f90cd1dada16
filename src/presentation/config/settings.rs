use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::TranscriptionProfile;
use crate::infrastructure::audio::TranscriptionProvider;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub scratch: ScratchSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
    pub profiles: ProfileSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_body_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Enables `/api/transcribe`, which reads arbitrary paths on this host.
    pub allow_local_paths: bool,
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScratchSettings {
    pub directory: PathBuf,
    /// Leftover scratch files older than this are removed at startup.
    pub stale_after_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    pub provider: ScoringProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSettings {
    pub summary: TranscriptionProfile,
    pub detailed: TranscriptionProfile,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}.toml` and `APP__*`
    /// variables (`APP__SERVER__PORT=8080`), later sources winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let scratch_default = std::env::temp_dir().join("oratio-scratch");

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.max_body_mb", 50)?
            .set_default("transcription.provider", "local")?
            .set_default("transcription.model", "openai/whisper-base")?
            .set_default("transcription.allow_local_paths", false)?
            .set_default("transcription.service_name", "whisper-server")?
            .set_default("scratch.directory", scratch_default.to_string_lossy().as_ref())?
            .set_default("scratch.stale_after_secs", 3600)?
            .set_default("scoring.provider", "openai")?
            .set_default("scoring.base_url", "http://localhost:1234/v1")?
            .set_default("scoring.model", "Qwen/Qwen2.5-0.5B-Instruct")?
            .set_default("scoring.api_key", "")?
            .set_default("scoring.max_tokens", 512)?
            .set_default("scoring.temperature", 0.7)?
            .set_default("scoring.top_p", 0.9)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("profiles.summary.shape", "summary")?
            .set_default("profiles.summary.input_mode", "samples")?
            .set_default("profiles.summary.forced_language", "en")?
            .set_default("profiles.summary.fallback_language", "en")?
            .set_default("profiles.detailed.shape", "detailed")?
            .set_default("profiles.detailed.input_mode", "path")?
            .set_default("profiles.detailed.fallback_language", "unknown")?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
