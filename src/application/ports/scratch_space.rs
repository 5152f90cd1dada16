use async_trait::async_trait;

use crate::domain::TempAudioHandle;

/// Per-request temporary files for audio that the backend reads from disk.
#[async_trait]
pub trait ScratchSpace: Send + Sync {
    /// Reserves a path no other live request can receive.
    async fn acquire(&self, extension: &str) -> Result<TempAudioHandle, ScratchError>;

    /// Persists `bytes` at the handle's path without replacing any existing file.
    async fn write(&self, handle: &TempAudioHandle, bytes: &[u8]) -> Result<u64, ScratchError>;

    /// Deletes the file. Failures are logged, never returned.
    async fn release(&self, handle: TempAudioHandle);
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchError {
    #[error("scratch directory unavailable: {0}")]
    DirectoryUnavailable(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
}
