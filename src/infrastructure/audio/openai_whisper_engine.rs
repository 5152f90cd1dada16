use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{AudioInput, TranscriptionEngine, TranscriptionError};
use crate::domain::{TranscriptSegment, TranscriptionResult};

use super::wav_encoder::encode_wav_pcm16;

/// Whisper behind an OpenAI-compatible `/audio/transcriptions` endpoint.
///
/// Stateless on our side, so concurrent requests are not serialized.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }

    async fn audio_part(input: AudioInput) -> Result<multipart::Part, TranscriptionError> {
        let (bytes, file_name, mime) = match input {
            AudioInput::File(path) => {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| TranscriptionError::DecodingFailed(format!("read: {}", e)))?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.wav")
                    .to_string();
                (bytes, file_name, "application/octet-stream")
            }
            AudioInput::Samples(pcm) => {
                let wav = encode_wav_pcm16(&pcm)
                    .map_err(|e| TranscriptionError::DecodingFailed(format!("wav: {}", e)))?;
                (wav, "audio.wav".to_string(), "audio/wav")
            }
        };

        multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))
    }
}

#[derive(Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        input: AudioInput,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", Self::audio_part(input).await?);
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        tracing::info!(
            chars = body.text.len(),
            segments = body.segments.len(),
            "OpenAI Whisper transcription completed"
        );

        Ok(TranscriptionResult {
            text: body.text,
            language: body.language,
            segments: body
                .segments
                .into_iter()
                .map(|s| TranscriptSegment::new(s.start, s.end, s.text))
                .collect(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
