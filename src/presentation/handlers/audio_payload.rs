use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::domain::{InlinePayload, TranscriptionRequest};

use super::error::ApiError;

pub const NO_AUDIO_DATA: &str = "No audio data provided";
pub const NO_AUDIO_FILE: &str = "No audio file provided";

/// `audio_data` arrives either as a base64 string or as a JSON byte array.
#[derive(Deserialize)]
#[serde(untagged)]
enum AudioData {
    Encoded(String),
    Bytes(Vec<u8>),
}

#[derive(Deserialize)]
struct InlineAudioBody {
    #[serde(default)]
    audio_data: Option<AudioData>,
    #[serde(default)]
    language: Option<String>,
}

/// Audio from either a multipart upload or a JSON body, chosen by content type.
pub struct AudioPayload(pub TranscriptionRequest);

impl<S> FromRequest<S> for AudioPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            return read_multipart_audio(multipart, NO_AUDIO_DATA).await.map(Self);
        }

        let Json(body) = Json::<InlineAudioBody>::from_request(req, state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

        let payload = match body.audio_data {
            Some(AudioData::Encoded(encoded)) => InlinePayload::Base64(encoded),
            Some(AudioData::Bytes(raw)) => InlinePayload::Raw(raw),
            None => return Err(ApiError::BadRequest(NO_AUDIO_DATA.to_string())),
        };

        Ok(Self(TranscriptionRequest::InlineAudio {
            payload,
            language: body.language,
        }))
    }
}

/// Reads the `audio` file part and the optional `language` text part.
/// `missing_audio` is the route's message when no `audio` part is present.
pub async fn read_multipart_audio(
    mut multipart: Multipart,
    missing_audio: &str,
) -> Result<TranscriptionRequest, ApiError> {
    let mut audio = None;
    let mut language = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                tracing::debug!(
                    filename = filename.as_deref().unwrap_or("unknown"),
                    bytes = bytes.len(),
                    "Audio part received"
                );
                audio = Some((bytes, filename));
            }
            Some("language") => {
                language = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (bytes, filename) =
        audio.ok_or_else(|| ApiError::BadRequest(missing_audio.to_string()))?;

    Ok(TranscriptionRequest::UploadedFile {
        bytes,
        filename,
        language,
    })
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::from_rejection(e.status(), format!("Failed to read multipart: {}", e.body_text()))
}
