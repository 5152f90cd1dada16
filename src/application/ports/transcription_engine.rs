use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{PcmAudio, TranscriptionResult};

/// What the backend is asked to transcribe.
#[derive(Debug, Clone)]
pub enum AudioInput {
    File(PathBuf),
    Samples(PcmAudio),
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        input: AudioInput,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError>;

    /// Model identifier reported by `/health`.
    fn model_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
