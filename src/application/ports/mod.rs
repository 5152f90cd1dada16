mod audio_decoder;
mod llm_client;
mod scratch_space;
mod transcription_engine;

pub use audio_decoder::{AudioDecoder, AudioDecoderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use scratch_space::{ScratchError, ScratchSpace};
pub use transcription_engine::{AudioInput, TranscriptionEngine, TranscriptionError};
