use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::Multipart;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use oratio::application::ports::{AudioInput, TranscriptionEngine, TranscriptionError};
use oratio::domain::PcmAudio;
use oratio::infrastructure::audio::OpenAiWhisperEngine;

type SeenFields = Arc<Mutex<Vec<(String, String)>>>;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, SeenFields, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let seen: SeenFields = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    let app = Router::new().route(
        "/v1/audio/transcriptions",
        post(move |mut multipart: Multipart| {
            let recorder = Arc::clone(&recorder);
            async move {
                while let Ok(Some(field)) = multipart.next_field().await {
                    let name = field.name().unwrap_or_default().to_string();
                    let value = if name == "file" {
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        let bytes = field.bytes().await.unwrap_or_default();
                        format!("{}:{}", file_name, bytes.len())
                    } else {
                        field.text().await.unwrap_or_default()
                    };
                    recorder.lock().unwrap().push((name, value));
                }
                let status = axum::http::StatusCode::from_u16(response_status).unwrap();
                (status, response_body).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, seen, shutdown_tx)
}

fn field<'a>(seen: &'a [(String, String)], name: &str) -> Option<&'a str> {
    seen.iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn given_verbose_json_response_when_transcribing_samples_then_maps_segments() {
    let body = r#"{"text":" Hello there.","language":"english","segments":[{"start":0.0,"end":1.5,"text":" Hello there."}]}"#;
    let (base_url, seen, shutdown_tx) = start_mock_whisper_server(200, body).await;

    let engine = OpenAiWhisperEngine::new("sk-test".to_string(), Some(base_url), None);
    let result = engine
        .transcribe(
            AudioInput::Samples(PcmAudio::new(vec![0.0; 1600], 16_000)),
            Some("en"),
        )
        .await
        .unwrap();

    assert_eq!(result.text, " Hello there.");
    assert_eq!(result.language.as_deref(), Some("english"));
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].end, 1.5);

    let seen = seen.lock().unwrap();
    assert_eq!(field(&seen, "model"), Some("whisper-1"));
    assert_eq!(field(&seen, "response_format"), Some("verbose_json"));
    assert_eq!(field(&seen, "language"), Some("en"));
    assert_eq!(field(&seen, "file"), Some("audio.wav:3244"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_file_input_when_transcribing_then_uploads_file_bytes() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("answer.mp3");
    std::fs::write(&path, b"mp3 bytes").unwrap();
    let (base_url, seen, shutdown_tx) =
        start_mock_whisper_server(200, r#"{"text":"from file"}"#).await;

    let engine = OpenAiWhisperEngine::new(
        "sk-test".to_string(),
        Some(base_url),
        Some("whisper-large".to_string()),
    );
    let result = engine.transcribe(AudioInput::File(path), None).await.unwrap();

    assert_eq!(result.text, "from file");
    assert!(result.segments.is_empty());
    let seen = seen.lock().unwrap();
    assert_eq!(field(&seen, "file"), Some("answer.mp3:9"));
    assert_eq!(field(&seen, "model"), Some("whisper-large"));
    assert_eq!(field(&seen, "language"), None);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_status_when_transcribing_then_returns_api_error() {
    let (base_url, _seen, shutdown_tx) =
        start_mock_whisper_server(400, r#"{"error":{"message":"bad audio"}}"#).await;

    let engine = OpenAiWhisperEngine::new("sk-test".to_string(), Some(base_url), None);
    let result = engine
        .transcribe(
            AudioInput::Samples(PcmAudio::new(vec![0.0; 10], 16_000)),
            None,
        )
        .await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(msg)) if msg.contains("bad audio")));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_returns_decoding_error() {
    let engine = OpenAiWhisperEngine::new(
        "sk-test".to_string(),
        Some("http://127.0.0.1:9/v1".to_string()),
        None,
    );

    let result = engine
        .transcribe(
            AudioInput::File("/definitely/not/here.wav".into()),
            None,
        )
        .await;

    assert!(matches!(result, Err(TranscriptionError::DecodingFailed(_))));
}
