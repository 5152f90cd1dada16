use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::{SampleAnswer, ScoreRequest, ScoringError};
use crate::infrastructure::observability::preview_text;
use crate::presentation::state::AppState;

use super::error::ApiError;

const SCORING_FAILED_FEEDBACK: &str = "Scoring failed. Please try again.";

#[derive(Deserialize)]
pub struct ScoreBody {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default, rename = "transcribedText")]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub sample_answers: Vec<SampleAnswerBody>,
}

#[derive(Deserialize)]
pub struct SampleAnswerBody {
    #[serde(default)]
    pub content: String,
    /// Clients send reference scores both as numbers and as strings.
    #[serde(default)]
    pub score: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct ScoreFailureResponse {
    pub error: String,
    pub score: f64,
    pub feedback: String,
}

impl From<SampleAnswerBody> for SampleAnswer {
    fn from(body: SampleAnswerBody) -> Self {
        let score = match body.score {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        Self {
            content: body.content,
            score,
        }
    }
}

impl ScoreBody {
    /// `user_text` wins over the legacy `transcribedText` alias when both are set.
    fn into_request(self) -> ScoreRequest {
        let transcript = self
            .user_text
            .filter(|t| !t.trim().is_empty())
            .or(self.transcribed_text)
            .unwrap_or_default();

        ScoreRequest {
            question: self.question,
            transcript,
            system_prompt: self.system_prompt,
            sample_answers: self.sample_answers.into_iter().map(Into::into).collect(),
        }
    }
}

#[tracing::instrument(skip_all, name = "score")]
pub async fn score_handler(
    State(state): State<AppState>,
    body: Result<Json<ScoreBody>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(body)) => body.into_request(),
        Err(e) => return ApiError::from_rejection(e.status(), e.body_text()).into_response(),
    };

    tracing::info!(answer = %preview_text(&request.transcript), "Scoring answer");

    match state.scoring_service.score(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(ScoringError::MissingTranscript) => {
            ApiError::BadRequest(ScoringError::MissingTranscript.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Scoring failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScoreFailureResponse {
                    error: e.to_string(),
                    score: 0.0,
                    feedback: SCORING_FAILED_FEEDBACK.to_string(),
                }),
            )
                .into_response()
        }
    }
}
