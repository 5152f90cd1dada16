use std::path::PathBuf;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use serde::Deserialize;

use crate::domain::{TranscriptionProfile, TranscriptionRequest};
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::transcription_response::{TextKey, render_transcription};

#[derive(Deserialize)]
pub struct PathTranscriptionRequest {
    #[serde(default)]
    pub audio_file: Option<String>,
}

/// Transcribes a file already on this host. Only routed when
/// `transcription.allow_local_paths` is enabled.
#[tracing::instrument(skip_all, name = "transcribe_path")]
pub async fn transcribe_path_handler(
    State(state): State<AppState>,
    body: Result<Json<PathTranscriptionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

    let path = body
        .audio_file
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No audio file path provided".to_string()))?;

    let normalized = state
        .transcription_service
        .transcribe(
            TranscriptionRequest::ReferencedFile {
                path: PathBuf::from(path),
            },
            &TranscriptionProfile::referenced(),
        )
        .await?;

    Ok(render_transcription(normalized, TextKey::Text))
}
