use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use oratio::application::ports::{ScratchError, ScratchSpace};
use oratio::infrastructure::storage::TempFileArena;

#[tokio::test]
async fn given_missing_directory_when_acquiring_then_creates_it_lazily() {
    let root = TempDir::new().unwrap();
    let directory = root.path().join("nested").join("scratch");
    let arena = TempFileArena::new(directory.clone());
    assert!(!directory.exists());

    let handle = arena.acquire("wav").await.unwrap();

    assert!(directory.is_dir());
    assert!(handle.path().starts_with(&directory));
    arena.release(handle).await;
}

#[tokio::test]
async fn given_many_acquisitions_when_acquiring_then_paths_are_unique() {
    let root = TempDir::new().unwrap();
    let arena = TempFileArena::new(root.path().to_path_buf());

    let mut paths = HashSet::new();
    for _ in 0..100 {
        let handle = arena.acquire("wav").await.unwrap();
        assert!(paths.insert(handle.path().to_path_buf()));
        arena.release(handle).await;
    }
}

#[tokio::test]
async fn given_handle_when_writing_then_file_holds_bytes() {
    let root = TempDir::new().unwrap();
    let arena = TempFileArena::new(root.path().to_path_buf());
    let handle = arena.acquire("ogg").await.unwrap();

    let written = arena.write(&handle, b"ogg payload").await.unwrap();

    assert_eq!(written, 11);
    assert_eq!(std::fs::read(handle.path()).unwrap(), b"ogg payload");
    arena.release(handle).await;
}

#[tokio::test]
async fn given_existing_file_at_path_when_writing_then_refuses_to_overwrite() {
    let root = TempDir::new().unwrap();
    let arena = TempFileArena::new(root.path().to_path_buf());
    let handle = arena.acquire("wav").await.unwrap();
    std::fs::write(handle.path(), b"someone else").unwrap();

    let result = arena.write(&handle, b"mine").await;

    assert!(matches!(result, Err(ScratchError::WriteFailed(_))));
    assert_eq!(std::fs::read(handle.path()).unwrap(), b"someone else");
    arena.release(handle).await;
}

#[tokio::test]
async fn given_written_file_when_releasing_then_file_is_deleted() {
    let root = TempDir::new().unwrap();
    let arena = TempFileArena::new(root.path().to_path_buf());
    let handle = arena.acquire("wav").await.unwrap();
    arena.write(&handle, b"data").await.unwrap();
    let path = handle.path().to_path_buf();

    arena.release(handle).await;

    assert!(!path.exists());
}

#[tokio::test]
async fn given_never_written_handle_when_releasing_then_does_not_fail() {
    let root = TempDir::new().unwrap();
    let arena = TempFileArena::new(root.path().to_path_buf());
    let handle = arena.acquire("wav").await.unwrap();

    arena.release(handle).await;
}

const STALE_AFTER: Duration = Duration::from_secs(3600);

fn write_aged(path: &Path, age: Duration) {
    std::fs::write(path, b"stale").unwrap();
    std::fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() - age)
        .unwrap();
}

#[tokio::test]
async fn given_old_leftover_files_when_purging_then_only_audio_files_removed() {
    let root = TempDir::new().unwrap();
    write_aged(&root.path().join("audio_old.wav"), Duration::from_secs(7200));
    write_aged(&root.path().join("audio_older.mp3"), Duration::from_secs(86_400));
    write_aged(&root.path().join("notes.txt"), Duration::from_secs(7200));
    let arena = TempFileArena::new(root.path().to_path_buf());

    let removed = arena.purge_stale(STALE_AFTER).await;

    assert_eq!(removed, 2);
    assert!(root.path().join("notes.txt").exists());
}

#[tokio::test]
async fn given_recent_audio_file_when_purging_then_keeps_it() {
    let root = TempDir::new().unwrap();
    write_aged(&root.path().join("audio_recent.wav"), Duration::from_secs(60));
    let arena = TempFileArena::new(root.path().to_path_buf());

    assert_eq!(arena.purge_stale(STALE_AFTER).await, 0);
    assert!(root.path().join("audio_recent.wav").exists());
}

#[tokio::test]
async fn given_two_workers_on_one_directory_when_second_starts_then_first_workers_file_survives() {
    let root = TempDir::new().unwrap();
    let first_worker = TempFileArena::new(root.path().to_path_buf());
    let handle = first_worker.acquire("wav").await.unwrap();
    first_worker.write(&handle, b"in flight").await.unwrap();

    let second_worker = TempFileArena::new(root.path().to_path_buf());
    let removed = second_worker.purge_stale(STALE_AFTER).await;

    assert_eq!(removed, 0);
    assert_eq!(std::fs::read(handle.path()).unwrap(), b"in flight");
    first_worker.release(handle).await;
}

#[tokio::test]
async fn given_missing_directory_when_purging_then_removes_nothing() {
    let root = TempDir::new().unwrap();
    let arena = TempFileArena::new(root.path().join("absent"));

    assert_eq!(arena.purge_stale(STALE_AFTER).await, 0);
}
