use tokio_util::sync::CancellationToken;

use crate::application::ports::TranscriptionError;

/// Runs `work` on the blocking pool with a token that is cancelled as soon as
/// the returned future is dropped (request timeout or client disconnect).
///
/// Blocking threads cannot be aborted, so `work` has to poll the token at its
/// own checkpoints and bail out with [`cancelled`].
pub async fn run_cancellable<T, F>(work: F) -> Result<T, TranscriptionError>
where
    T: Send + 'static,
    F: FnOnce(&CancellationToken) -> Result<T, TranscriptionError> + Send + 'static,
{
    let token = CancellationToken::new();
    let _cancel_on_drop = token.clone().drop_guard();

    tokio::task::spawn_blocking(move || work(&token))
        .await
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("inference task: {}", e)))?
}

/// Checkpoint for blocking work started through [`run_cancellable`].
pub fn ensure_active(token: &CancellationToken) -> Result<(), TranscriptionError> {
    if token.is_cancelled() {
        return Err(cancelled());
    }
    Ok(())
}

pub fn cancelled() -> TranscriptionError {
    TranscriptionError::TranscriptionFailed("inference abandoned by caller".to_string())
}
