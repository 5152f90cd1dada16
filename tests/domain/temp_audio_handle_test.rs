use oratio::domain::{TempAudioHandle, TempAudioId};
use tempfile::TempDir;

#[test]
fn given_handle_when_created_then_path_embeds_id_and_extension() {
    let dir = TempDir::new().unwrap();
    let id = TempAudioId::new();

    let handle = TempAudioHandle::new(dir.path(), id, "mp3");

    let name = handle.path().file_name().unwrap().to_str().unwrap().to_string();
    assert_eq!(name, format!("audio_{}.mp3", id));
    assert!(handle.path().starts_with(dir.path()));
    handle.disarm();
}

#[test]
fn given_two_handles_when_created_then_paths_differ() {
    let dir = TempDir::new().unwrap();

    let first = TempAudioHandle::new(dir.path(), TempAudioId::new(), "wav");
    let second = TempAudioHandle::new(dir.path(), TempAudioId::new(), "wav");

    assert_ne!(first.path(), second.path());
}

#[test]
fn given_armed_handle_when_dropped_then_file_is_removed() {
    let dir = TempDir::new().unwrap();
    let handle = TempAudioHandle::new(dir.path(), TempAudioId::new(), "wav");
    let path = handle.path().to_path_buf();
    std::fs::write(&path, b"audio").unwrap();

    drop(handle);

    assert!(!path.exists());
}

#[test]
fn given_disarmed_handle_when_dropped_then_file_is_kept() {
    let dir = TempDir::new().unwrap();
    let handle = TempAudioHandle::new(dir.path(), TempAudioId::new(), "wav");
    std::fs::write(handle.path(), b"audio").unwrap();

    let path = handle.disarm();

    assert!(path.exists());
}

#[test]
fn given_armed_handle_without_file_when_dropped_then_does_not_panic() {
    let dir = TempDir::new().unwrap();
    let handle = TempAudioHandle::new(dir.path(), TempAudioId::new(), "wav");
    drop(handle);
}

#[test]
fn given_uploaded_filenames_when_choosing_extension_then_only_short_alphanumeric_survive() {
    assert_eq!(TempAudioHandle::extension_for(Some("answer.WEBM")), "webm");
    assert_eq!(TempAudioHandle::extension_for(Some("clip.m4a")), "m4a");
    assert_eq!(TempAudioHandle::extension_for(Some("noext")), "wav");
    assert_eq!(TempAudioHandle::extension_for(Some("evil.../../x")), "wav");
    assert_eq!(TempAudioHandle::extension_for(Some("long.extension")), "wav");
    assert_eq!(TempAudioHandle::extension_for(Some("a.w-v")), "wav");
    assert_eq!(TempAudioHandle::extension_for(None), "wav");
}
