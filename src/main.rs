use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use oratio::application::ports::TranscriptionEngine;
use oratio::application::services::{ChatService, ScoringService, TranscriptionService};
use oratio::infrastructure::audio::{
    MockTranscriptionEngine, SymphoniaAudioDecoder, TranscriptionEngineFactory,
};
use oratio::infrastructure::llm::create_llm_client;
use oratio::infrastructure::observability::{TracingConfig, init_tracing};
use oratio::infrastructure::storage::TempFileArena;
use oratio::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let scaffold_config = ScaffoldConfig::default();
    let engine = build_engine(&settings, &scaffold_config).await?;

    let scratch = Arc::new(TempFileArena::new(settings.scratch.directory.clone()));
    scratch.purge_stale(stale_scratch_age(&settings)).await;

    let transcription_service = Arc::new(TranscriptionService::new(
        engine,
        Arc::new(SymphoniaAudioDecoder),
        scratch,
        settings
            .transcription
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
    ));

    let llm_client = create_llm_client(&settings.scoring, &scaffold_config)
        .context("Failed to create scoring client")?;
    let scoring_service = Arc::new(ScoringService::new(Arc::clone(&llm_client)));
    let chat_service = Arc::new(ChatService::new(llm_client));

    let state = AppState {
        transcription_service,
        scoring_service,
        chat_service,
        profiles: Arc::new(settings.profiles.clone()),
        service_name: settings.transcription.service_name.clone(),
        allow_local_paths: settings.transcription.allow_local_paths,
        max_body_bytes: settings.server.max_body_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, scaffold = scaffold_config.enabled, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Never shorter than twice the request timeout, so a file still owned by a
/// request in another worker is left alone.
fn stale_scratch_age(settings: &Settings) -> Duration {
    let configured = settings.scratch.stale_after_secs;
    let in_flight = settings
        .transcription
        .request_timeout_secs
        .unwrap_or(0)
        .saturating_mul(2);
    Duration::from_secs(configured.max(in_flight))
}

async fn build_engine(
    settings: &Settings,
    scaffold: &ScaffoldConfig,
) -> anyhow::Result<Arc<dyn TranscriptionEngine>> {
    if scaffold.enabled {
        tracing::info!(
            delay_ms = scaffold.mock_response_delay_ms,
            "Scaffold mode: using mock transcription engine"
        );
        return Ok(Arc::new(MockTranscriptionEngine::new(scaffold.mock_delay())));
    }

    let transcription = settings.transcription.clone();
    tracing::info!(
        provider = ?transcription.provider,
        model = %transcription.model,
        "Loading transcription engine"
    );

    let engine = tokio::task::spawn_blocking(move || {
        TranscriptionEngineFactory::create(
            transcription.provider,
            &transcription.model,
            transcription.api_key,
            transcription.base_url,
        )
    })
    .await
    .context("Engine loader task failed")??;

    tracing::info!(model = engine.model_name(), "Transcription engine ready");
    Ok(engine)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
