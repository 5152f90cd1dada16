mod audio_payload;
mod chat;
mod error;
mod evaluate;
mod feedback;
mod health;
mod score;
mod transcribe;
mod transcribe_path;
mod transcription_response;

pub use audio_payload::{AudioPayload, NO_AUDIO_DATA, NO_AUDIO_FILE};
pub use chat::chat_handler;
pub use error::{ApiError, ErrorResponse};
pub use evaluate::evaluate_handler;
pub use feedback::feedback_handler;
pub use health::health_handler;
pub use score::score_handler;
pub use transcribe::{transcribe_file_handler, transcribe_handler};
pub use transcribe_path::transcribe_path_handler;
pub use transcription_response::TextKey;
