use std::io;
use std::path::{Path, PathBuf};

use super::TempAudioId;

const DEFAULT_EXTENSION: &str = "wav";
const MAX_EXTENSION_LEN: usize = 5;

/// Owned reference to one scratch audio file for the lifetime of one request.
///
/// The handle is neither `Clone` nor `Copy`: exactly one owner can release it.
/// If it is dropped while still armed (the request future was cancelled or
/// panicked before release), the file is removed best-effort.
#[derive(Debug)]
pub struct TempAudioHandle {
    id: TempAudioId,
    path: PathBuf,
    armed: bool,
}

impl TempAudioHandle {
    pub fn new(directory: &Path, id: TempAudioId, extension: &str) -> Self {
        let path = directory.join(format!("audio_{}.{}", id.as_uuid(), extension));
        Self {
            id,
            path,
            armed: true,
        }
    }

    pub fn id(&self) -> TempAudioId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Marks the file as handled so `Drop` leaves the path alone.
    pub fn disarm(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }

    /// Picks a scratch file extension from an uploaded filename.
    ///
    /// Only short alphanumeric extensions survive; everything else maps to `wav`.
    pub fn extension_for(filename: Option<&str>) -> String {
        filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }
}

impl Drop for TempAudioHandle {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Removed abandoned scratch file");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove abandoned scratch file"
                );
            }
        }
    }
}
