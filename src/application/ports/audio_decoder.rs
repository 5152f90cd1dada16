use std::path::Path;

use crate::domain::PcmAudio;

/// Synchronous and CPU-bound; callers run it on the blocking pool.
pub trait AudioDecoder: Send + Sync {
    fn decode_file(&self, path: &Path) -> Result<PcmAudio, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
