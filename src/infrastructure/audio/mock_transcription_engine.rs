use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AudioInput, TranscriptionEngine, TranscriptionError};
use crate::domain::{TranscriptSegment, TranscriptionResult};

const MOCK_TRANSCRIPT: &str = "This is a scaffold transcription.";

/// Canned backend for scaffold mode; never loads a model.
pub struct MockTranscriptionEngine {
    delay: Duration,
}

impl MockTranscriptionEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        input: AudioInput,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let end = match &input {
            AudioInput::Samples(pcm) => pcm.duration_secs(),
            AudioInput::File(_) => 1.0,
        };

        Ok(TranscriptionResult {
            text: MOCK_TRANSCRIPT.to_string(),
            language: language.map(str::to_string),
            segments: vec![TranscriptSegment::new(0.0, end, MOCK_TRANSCRIPT)],
        })
    }

    fn model_name(&self) -> &str {
        "scaffold"
    }
}
