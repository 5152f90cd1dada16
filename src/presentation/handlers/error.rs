use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::TranscriptionPipelineError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure a handler can surface, rendered as `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionPipelineError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Extractor rejections surface as 400, except oversized bodies which keep 413.
    pub fn from_rejection(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(message)
        } else {
            Self::BadRequest(message)
        }
    }

    /// Body rejections on the JSON-only routes are 500s, as any other
    /// failure there; oversized bodies still keep 413.
    pub fn from_body_rejection(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(message)
        } else {
            Self::Internal(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Transcription(e) => match e {
                TranscriptionPipelineError::InvalidRequest(_)
                | TranscriptionPipelineError::EmptyAudio
                | TranscriptionPipelineError::NotFound(_) => StatusCode::BAD_REQUEST,
                TranscriptionPipelineError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
                TranscriptionPipelineError::TranscriptionFailed(_)
                | TranscriptionPipelineError::Scratch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
