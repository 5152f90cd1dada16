mod chat_message;
mod pcm_audio;
mod request_stage;
mod score;
mod temp_audio_handle;
mod temp_audio_id;
mod transcript;
mod transcription_profile;
mod transcription_request;

pub use chat_message::{ChatMessage, MessageRole};
pub use pcm_audio::PcmAudio;
pub use request_stage::RequestStage;
pub use score::{MAX_SCORE, MIN_SCORE, Score, ScoreResult};
pub use temp_audio_handle::TempAudioHandle;
pub use temp_audio_id::TempAudioId;
pub use transcript::{TranscriptSegment, TranscriptionResult};
pub use transcription_profile::{InputMode, ResponseShape, TranscriptionProfile};
pub use transcription_request::{InlinePayload, TranscriptionRequest};
