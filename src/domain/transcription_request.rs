use std::path::PathBuf;

use bytes::Bytes;

/// Audio as it arrives on the wire, before any decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum InlinePayload {
    Base64(String),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionRequest {
    InlineAudio {
        payload: InlinePayload,
        language: Option<String>,
    },
    UploadedFile {
        bytes: Bytes,
        filename: Option<String>,
        language: Option<String>,
    },
    /// A caller-owned file on local disk. Never copied into scratch, never deleted.
    ReferencedFile { path: PathBuf },
}

impl TranscriptionRequest {
    pub fn language_hint(&self) -> Option<&str> {
        match self {
            Self::InlineAudio { language, .. } | Self::UploadedFile { language, .. } => {
                language.as_deref().map(str::trim).filter(|l| !l.is_empty())
            }
            Self::ReferencedFile { .. } => None,
        }
    }
}
