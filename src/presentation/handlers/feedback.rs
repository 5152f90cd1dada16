use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::application::services::compose_feedback;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub suggestions: Vec<String>,
}

pub async fn feedback_handler(
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::from_body_rejection(e.status(), e.body_text()))?;

    let feedback = compose_feedback(&body.scores);
    tracing::debug!(
        criteria = body.scores.len(),
        transcription_chars = body.transcription.chars().count(),
        "Feedback composed"
    );

    Ok(Json(FeedbackResponse {
        feedback: feedback.text,
        suggestions: feedback.suggestions,
    }))
}
