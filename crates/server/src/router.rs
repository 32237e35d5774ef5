use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/connect", post(handlers::connect_handler))
        .route(
            "/api/connect/upload",
            post(handlers::upload_handler).layer(DefaultBodyLimit::max(50 * 1024 * 1024)),
        )
        .route("/api/session", get(handlers::session_handler))
        .route("/api/chat", post(handlers::chat_handler))
        .route("/api/reset", post(handlers::reset_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
