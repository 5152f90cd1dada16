use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{
    DetailedTranscription, NormalizedTranscription, SummaryTranscription,
};
use crate::infrastructure::observability::preview_text;

/// `/transcribe` names the text field `transcribedText`; every other summary
/// endpoint calls it `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    TranscribedText,
    Text,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    #[serde(rename = "transcribedText")]
    pub transcribed_text: String,
    pub language: String,
    pub segments: usize,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub text: String,
    pub language: String,
    pub segments: usize,
}

#[derive(Serialize)]
pub struct SegmentResponse {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Serialize)]
pub struct DetailedResponse {
    pub text: String,
    pub language: String,
    pub segments: Vec<SegmentResponse>,
}

impl From<DetailedTranscription> for DetailedResponse {
    fn from(d: DetailedTranscription) -> Self {
        Self {
            text: d.text,
            language: d.language,
            segments: d
                .segments
                .into_iter()
                .map(|s| SegmentResponse {
                    start: s.start,
                    end: s.end,
                    text: s.text,
                })
                .collect(),
        }
    }
}

pub fn render_transcription(normalized: NormalizedTranscription, key: TextKey) -> Response {
    tracing::debug!(
        language = match &normalized {
            NormalizedTranscription::Summary(s) => s.language.as_str(),
            NormalizedTranscription::Detailed(d) => d.language.as_str(),
        },
        preview = %preview_text(normalized.text()),
        "Transcription ready"
    );

    match normalized {
        NormalizedTranscription::Summary(SummaryTranscription {
            text,
            language,
            segments,
        }) => match key {
            TextKey::TranscribedText => Json(TranscribeResponse {
                transcribed_text: text,
                language,
                segments,
            })
            .into_response(),
            TextKey::Text => Json(SummaryResponse {
                text,
                language,
                segments,
            })
            .into_response(),
        },
        NormalizedTranscription::Detailed(detailed) => {
            Json(DetailedResponse::from(detailed)).into_response()
        }
    }
}
