mod audio_ingestor;
mod chat_service;
mod feedback_composer;
mod result_normalizer;
mod score_extractor;
mod scoring_service;
mod speaking_evaluator;
mod transcription_service;

pub use audio_ingestor::{AudioIngestor, IngestError, IngestedAudio};
pub use chat_service::{ChatError, ChatService};
pub use feedback_composer::{Feedback, compose_feedback};
pub use result_normalizer::{
    DetailedTranscription, NormalizedTranscription, SummaryTranscription, normalize,
};
pub use score_extractor::extract_score;
pub use scoring_service::{
    DEFAULT_SYSTEM_PROMPT, SampleAnswer, ScoreRequest, ScoringError, ScoringService,
};
pub use speaking_evaluator::{SpeakingEvaluation, evaluate_speaking};
pub use transcription_service::{TranscriptionPipelineError, TranscriptionService};
