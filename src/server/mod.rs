//! HTTP server for better-prompt
//!
//! Exposes the improvement oracle and the scorer over a small JSON API:
//!
//! - `POST /api/improve` - `{prompt}` → `{output, scores}`
//! - `POST /api/score` - `{text}` → `ScoreRecord`
//! - `GET /api/health` - liveness and configured oracle
//!
//! Every failure is answered with `{error}` and a non-2xx status.

mod routes;

use crate::ai::PromptImprover;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Application state shared across handlers
pub struct AppState {
    /// `None` when no API key is configured; improve requests then fail
    pub improver: Option<Arc<dyn PromptImprover>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(improver: Option<Arc<dyn PromptImprover>>) -> Self {
        Self {
            improver,
            start_time: Instant::now(),
        }
    }
}

/// Where to listen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: crate::config::DEFAULT_HOST.to_string(),
            port: crate::config::DEFAULT_PORT,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::improve_routes())
        .merge(routes::score_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    match &state.improver {
        Some(improver) => info!("Improvement oracle: {}", improver.name()),
        None => warn!("No improvement oracle configured; /api/improve will answer 500"),
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Better Prompt server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown requested");
        })
        .await?;

    Ok(())
}
