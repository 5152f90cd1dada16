use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::OnceCell;

use crate::application::ports::{ScratchError, ScratchSpace};
use crate::domain::{TempAudioHandle, TempAudioId};

const SCRATCH_PREFIX: &str = "audio_";

/// Scratch directory of per-request audio files on the local filesystem.
///
/// Every handle embeds a fresh UUID v4, and files are opened with
/// `create_new`, so a write can never land on another request's file.
pub struct TempFileArena {
    directory: PathBuf,
    ready: OnceCell<()>,
}

impl TempFileArena {
    /// The directory is created on first `acquire`, not here.
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ready: OnceCell::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn ensure_directory(&self) -> Result<(), ScratchError> {
        self.ready
            .get_or_try_init(|| async {
                let created = tokio::fs::create_dir_all(&self.directory)
                    .await
                    .map_err(|e| {
                        ScratchError::DirectoryUnavailable(format!(
                            "{}: {}",
                            self.directory.display(),
                            e
                        ))
                    });
                if created.is_ok() {
                    tracing::debug!(directory = %self.directory.display(), "Scratch directory ready");
                }
                created
            })
            .await
            .map(|_| ())
    }

    /// Removes `audio_*` files last modified more than `older_than` ago.
    ///
    /// The directory may be shared by several worker processes, so a file is
    /// only treated as abandoned once it has outlived any request that could
    /// still own it. Returns the count removed.
    pub async fn purge_stale(&self, older_than: Duration) -> usize {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to scan scratch directory");
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut removed = 0;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_scratch = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(SCRATCH_PREFIX));
            if !is_scratch {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    tracing::debug!(
                        path = %entry.path().display(),
                        error = %e,
                        "Skipping unreadable scratch entry"
                    );
                    continue;
                }
            };
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age < older_than {
                continue;
            }

            if tokio::fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(
                removed,
                older_than_secs = older_than.as_secs(),
                "Purged stale scratch files"
            );
        }
        removed
    }
}

#[async_trait]
impl ScratchSpace for TempFileArena {
    async fn acquire(&self, extension: &str) -> Result<TempAudioHandle, ScratchError> {
        self.ensure_directory().await?;
        let handle = TempAudioHandle::new(&self.directory, TempAudioId::new(), extension);

        tracing::debug!(
            handle = %handle.id(),
            path = %handle.path().display(),
            "Scratch file acquired"
        );

        Ok(handle)
    }

    async fn write(&self, handle: &TempAudioHandle, bytes: &[u8]) -> Result<u64, ScratchError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(handle.path())
            .await
            .map_err(|e| ScratchError::WriteFailed(format!("open: {}", e)))?;

        file.write_all(bytes)
            .await
            .map_err(|e| ScratchError::WriteFailed(format!("write: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| ScratchError::WriteFailed(format!("flush: {}", e)))?;

        Ok(bytes.len() as u64)
    }

    async fn release(&self, handle: TempAudioHandle) {
        let id = handle.id();
        let path = handle.disarm();

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(handle = %id, "Scratch file released");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(handle = %id, "Scratch file was never written");
            }
            Err(e) => {
                tracing::warn!(
                    handle = %id,
                    path = %path.display(),
                    error = %e,
                    "Failed to clean up scratch file"
                );
            }
        }
    }
}
