use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::application::ports::{
    AudioDecoder, AudioInput, ScratchError, ScratchSpace, TranscriptionEngine,
};
use crate::domain::{
    InputMode, RequestStage, TempAudioHandle, TranscriptionProfile, TranscriptionRequest,
    TranscriptionResult,
};

use super::audio_ingestor::{AudioIngestor, IngestError, IngestedAudio};
use super::result_normalizer::{NormalizedTranscription, normalize};

/// Runs one transcription request from raw payload to normalized result.
///
/// The service holds no per-request state. Each call owns its scratch handle
/// and releases it before returning, whatever the outcome. The only thing
/// shared between concurrent calls is the engine, which decides for itself
/// whether inference has to be serialized.
pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
    decoder: Arc<dyn AudioDecoder>,
    scratch: Arc<dyn ScratchSpace>,
    request_timeout: Option<Duration>,
}

impl TranscriptionService {
    pub fn new(
        engine: Arc<dyn TranscriptionEngine>,
        decoder: Arc<dyn AudioDecoder>,
        scratch: Arc<dyn ScratchSpace>,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            engine,
            decoder,
            scratch,
            request_timeout,
        }
    }

    pub fn model_name(&self) -> &str {
        self.engine.model_name()
    }

    #[tracing::instrument(
        skip_all,
        fields(shape = ?profile.shape, stage = tracing::field::Empty)
    )]
    pub async fn transcribe(
        &self,
        request: TranscriptionRequest,
        profile: &TranscriptionProfile,
    ) -> Result<NormalizedTranscription, TranscriptionPipelineError> {
        let mut stage = RequestStage::Received;
        let outcome = self.run(request, profile, &mut stage).await;

        match &outcome {
            Ok(normalized) => {
                tracing::info!(
                    segments = normalized.segment_count(),
                    chars = normalized.text().len(),
                    "Transcription request completed"
                );
            }
            Err(e) => {
                tracing::warn!(stage = %stage, error = %e, "Transcription request failed");
            }
        }

        outcome
    }

    async fn run(
        &self,
        request: TranscriptionRequest,
        profile: &TranscriptionProfile,
        stage: &mut RequestStage,
    ) -> Result<NormalizedTranscription, TranscriptionPipelineError> {
        let language = profile
            .effective_language(request.language_hint())
            .map(str::to_string);

        enter(stage, RequestStage::Decoding);
        let audio = AudioIngestor::ingest(request)?;

        let result = match audio {
            IngestedAudio::Referenced(path) => {
                if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    tracing::warn!(path = %path.display(), "Referenced audio file not found");
                    return Err(TranscriptionPipelineError::NotFound(
                        path.display().to_string(),
                    ));
                }
                enter(stage, RequestStage::Transcribing);
                self.run_backend(&path, profile, language.as_deref()).await?
            }
            IngestedAudio::Buffer { bytes, extension } => {
                enter(stage, RequestStage::Persisting);
                let handle = self.scratch.acquire(&extension).await?;

                let outcome = self
                    .persist_and_transcribe(&handle, bytes, profile, language.as_deref(), stage)
                    .await;

                tracing::debug!(from = %stage, "Entering cleanup");
                self.scratch.release(handle).await;
                outcome?
            }
        };

        enter(stage, RequestStage::Normalizing);
        let normalized = normalize(result, profile);

        enter(stage, RequestStage::Responding);
        Ok(normalized)
    }

    async fn persist_and_transcribe(
        &self,
        handle: &TempAudioHandle,
        bytes: Bytes,
        profile: &TranscriptionProfile,
        language: Option<&str>,
        stage: &mut RequestStage,
    ) -> Result<TranscriptionResult, TranscriptionPipelineError> {
        let written = self.scratch.write(handle, &bytes).await?;
        drop(bytes);

        if written == 0 {
            return Err(TranscriptionPipelineError::EmptyAudio);
        }

        tracing::debug!(
            handle = %handle.id(),
            bytes = written,
            "Audio persisted to scratch file"
        );

        enter(stage, RequestStage::Transcribing);
        self.run_backend(handle.path(), profile, language).await
    }

    async fn run_backend(
        &self,
        path: &Path,
        profile: &TranscriptionProfile,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionPipelineError> {
        let work = self.load_and_transcribe(path.to_path_buf(), profile.input_mode, language);

        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| TranscriptionPipelineError::TimedOut(limit))?,
            None => work.await,
        }
    }

    async fn load_and_transcribe(
        &self,
        path: PathBuf,
        input_mode: InputMode,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionPipelineError> {
        let input = match input_mode {
            InputMode::Path => AudioInput::File(path),
            InputMode::Samples => {
                let decoder = Arc::clone(&self.decoder);
                let pcm = tokio::task::spawn_blocking(move || decoder.decode_file(&path))
                    .await
                    .map_err(|e| backend_failure(format!("decoder task: {e}")))?
                    .map_err(backend_failure)?;

                tracing::debug!(
                    sample_rate = pcm.sample_rate,
                    duration_secs = pcm.duration_secs(),
                    "Audio loaded for inference"
                );
                AudioInput::Samples(pcm)
            }
        };

        self.engine
            .transcribe(input, language)
            .await
            .map_err(backend_failure)
    }
}

fn backend_failure(e: impl std::fmt::Display) -> TranscriptionPipelineError {
    TranscriptionPipelineError::TranscriptionFailed(e.to_string())
}

fn enter(stage: &mut RequestStage, next: RequestStage) {
    *stage = next;
    tracing::Span::current().record("stage", next.as_str());
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionPipelineError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Audio file is empty")]
    EmptyAudio,
    #[error("Audio file not found")]
    NotFound(String),
    #[error("{0}")]
    TranscriptionFailed(String),
    #[error("Transcription timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    #[error("scratch: {0}")]
    Scratch(#[from] ScratchError),
}

impl From<IngestError> for TranscriptionPipelineError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::InvalidRequest(message) => Self::InvalidRequest(message),
            IngestError::EmptyAudio => Self::EmptyAudio,
        }
    }
}
