// HTTP server module
// Thin axum transport over the turn engine: routing, rate limiting, CORS.

mod handlers;
mod middleware;
mod types;

pub use handlers::create_router;
pub use middleware::{rate_limit_middleware, RateLimiter};
pub use types::{CharacterSummary, ErrorBody, LevelSummary, TurnResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::game::TurnEngine;
use crate::levels::LevelRegistry;

/// Shared, read-only state behind every handler.
pub struct AppState {
    pub engine: Arc<TurnEngine>,
    pub registry: Arc<LevelRegistry>,
    /// Master switch for signal detail and prompt internals in responses;
    /// callers still have to ask per request.
    pub debug_responses: bool,
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind_address: &str, router: axum::Router) -> Result<()> {
    let addr: SocketAddr = bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {bind_address}"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, router)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
