use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, evaluate_handler, feedback_handler, health_handler, score_handler,
    transcribe_file_handler, transcribe_handler, transcribe_path_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/transcribe", post(transcribe_handler))
        .route("/transcribe-file", post(transcribe_file_handler))
        .route("/score", post(score_handler))
        .route("/chat", post(chat_handler))
        .route("/api/evaluate", post(evaluate_handler))
        .route("/feedback", post(feedback_handler))
        .route("/api/feedback", post(feedback_handler));

    if state.allow_local_paths {
        tracing::warn!("Local path transcription enabled on /api/transcribe");
        router = router.route("/api/transcribe", post(transcribe_path_handler));
    }

    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    router
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
