use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::application::services::ChatError;
use crate::domain::ChatMessage;
use crate::infrastructure::observability::preview_text;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::from_body_rejection(e.status(), e.body_text()))?;

    let response = state
        .chat_service
        .reply(&body.messages)
        .await
        .map_err(|e| match e {
            ChatError::NoMessages => ApiError::BadRequest(e.to_string()),
            ChatError::Completion(_) => ApiError::Internal(e.to_string()),
        })?;

    tracing::debug!(reply = %preview_text(&response), "Chat reply");

    Ok(Json(ChatResponse { response }))
}
