use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::application::services::{SpeakingEvaluation, evaluate_speaking};

use super::error::ApiError;

/// `question`, `sample_answer` and `criteria` are accepted for compatibility
/// and do not influence the rubric yet.
#[derive(Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub sample_answer: Option<String>,
    #[serde(default)]
    pub criteria: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    pub pronunciation: f64,
    pub fluency: f64,
    pub grammar: f64,
    pub vocabulary: f64,
    pub content: f64,
    pub word_count: usize,
}

impl From<SpeakingEvaluation> for EvaluateResponse {
    fn from(e: SpeakingEvaluation) -> Self {
        Self {
            pronunciation: e.pronunciation,
            fluency: e.fluency,
            grammar: e.grammar,
            vocabulary: e.vocabulary,
            content: e.content,
            word_count: e.word_count,
        }
    }
}

pub async fn evaluate_handler(
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::from_body_rejection(e.status(), e.body_text()))?;

    let evaluation = evaluate_speaking(&body.transcription);
    tracing::debug!(word_count = evaluation.word_count, "Speaking evaluated");

    Ok(Json(evaluation.into()))
}
