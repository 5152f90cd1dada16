use std::sync::Arc;

use crate::application::services::{ChatService, ScoringService, TranscriptionService};
use crate::presentation::config::ProfileSettings;

/// Read-only state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub scoring_service: Arc<ScoringService>,
    pub chat_service: Arc<ChatService>,
    pub profiles: Arc<ProfileSettings>,
    pub service_name: String,
    pub allow_local_paths: bool,
    pub max_body_bytes: usize,
}
