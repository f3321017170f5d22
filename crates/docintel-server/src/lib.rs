//! docintel HTTP API
//!
//! REST endpoints for:
//! - Running documents (JSON text or file uploads) through the pipeline
//! - Answering questions from semantic memory
//! - Inspecting and resetting memory
//! - Listing configured providers

mod error;
mod handlers;
mod models;
mod state;

pub use error::ApiError;
pub use models::*;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use docintel_core::ServerConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Upload size cap for `/api/upload-document`
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // Pipeline
        .route("/api/process-document", post(handlers::process_document))
        .route(
            "/api/upload-document",
            post(handlers::upload_document).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Memory
        .route("/api/query-memory", post(handlers::query_memory))
        .route("/api/memory-stats", get(handlers::memory_stats))
        .route("/api/memory", delete(handlers::clear_memory))
        .route("/api/memory/:id", delete(handlers::delete_document))
        // Providers
        .route("/api/providers", get(handlers::providers))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn start_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting docintel API on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
