use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;

use crate::domain::{InlinePayload, TempAudioHandle, TranscriptionRequest};

/// Audio bytes ready to be persisted, or a path the caller already owns.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestedAudio {
    Buffer { bytes: Bytes, extension: String },
    Referenced(PathBuf),
}

impl IngestedAudio {
    pub fn byte_len(&self) -> Option<usize> {
        match self {
            Self::Buffer { bytes, .. } => Some(bytes.len()),
            Self::Referenced(_) => None,
        }
    }
}

pub struct AudioIngestor;

impl AudioIngestor {
    /// Turns a transport payload into raw audio bytes. Pure: touches no files.
    pub fn ingest(request: TranscriptionRequest) -> Result<IngestedAudio, IngestError> {
        let audio = match request {
            TranscriptionRequest::InlineAudio { payload, .. } => IngestedAudio::Buffer {
                bytes: decode_inline(payload)?,
                extension: TempAudioHandle::extension_for(None),
            },
            TranscriptionRequest::UploadedFile {
                bytes, filename, ..
            } => IngestedAudio::Buffer {
                extension: TempAudioHandle::extension_for(filename.as_deref()),
                bytes,
            },
            TranscriptionRequest::ReferencedFile { path } => {
                if path.as_os_str().is_empty() {
                    return Err(IngestError::InvalidRequest(
                        "No audio file path provided".to_string(),
                    ));
                }
                return Ok(IngestedAudio::Referenced(path));
            }
        };

        match audio.byte_len() {
            Some(0) => Err(IngestError::EmptyAudio),
            _ => Ok(audio),
        }
    }
}

fn decode_inline(payload: InlinePayload) -> Result<Bytes, IngestError> {
    match payload {
        InlinePayload::Raw(bytes) => Ok(Bytes::from(bytes)),
        InlinePayload::Base64(encoded) => {
            let body = strip_data_uri(encoded.trim());
            let cleaned: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            general_purpose::STANDARD
                .decode(cleaned.as_bytes())
                .map(Bytes::from)
                .map_err(|e| IngestError::InvalidRequest(format!("Invalid base64 audio data: {e}")))
        }
    }
}

/// Accepts `data:audio/wav;base64,<payload>` as well as a bare payload.
fn strip_data_uri(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, payload)) = encoded.split_once(";base64,") {
            return payload;
        }
    }
    encoded
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Audio file is empty")]
    EmptyAudio,
}
