use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::Response;

use crate::presentation::state::AppState;

use super::audio_payload::{AudioPayload, NO_AUDIO_FILE, read_multipart_audio};
use super::error::ApiError;
use super::transcription_response::{TextKey, render_transcription};

#[tracing::instrument(skip_all, name = "transcribe")]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    AudioPayload(request): AudioPayload,
) -> Result<Response, ApiError> {
    let normalized = state
        .transcription_service
        .transcribe(request, &state.profiles.summary)
        .await?;

    Ok(render_transcription(normalized, TextKey::TranscribedText))
}

#[tracing::instrument(skip_all, name = "transcribe_file")]
pub async fn transcribe_file_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
    let request = read_multipart_audio(multipart, NO_AUDIO_FILE).await?;

    let normalized = state
        .transcription_service
        .transcribe(request, &state.profiles.detailed)
        .await?;

    Ok(render_transcription(normalized, TextKey::Text))
}
