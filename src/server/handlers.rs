// HTTP route handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{rate_limit_middleware, RateLimiter};
use super::types::{ErrorBody, LevelSummary, TurnResponse};
use super::AppState;
use crate::game::{TurnError, TurnRequest};

/// Assemble the application router.
pub fn create_router(state: Arc<AppState>, limiter: RateLimiter) -> Router {
    Router::new()
        .route("/send_email", post(send_email))
        .route("/levels", get(list_levels))
        .route("/levels/:name", get(get_level))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(Extension(limiter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// POST /send_email: run one turn.
async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TurnRequest>,
) -> Response {
    match state.engine.run_turn(&request).await {
        Ok(outcome) => {
            let include_debug = request.debug && state.debug_responses;
            Json(TurnResponse {
                response: outcome.response,
                success: outcome.success,
                security_checks: include_debug.then_some(outcome.signals),
                debug_info: if include_debug { outcome.debug } else { None },
            })
            .into_response()
        }
        Err(error) => {
            let status = match &error {
                TurnError::MissingField(_) => StatusCode::BAD_REQUEST,
                TurnError::UnknownCharacter(_) => StatusCode::NOT_FOUND,
            };
            error_response(status, error.to_string())
        }
    }
}

/// GET /levels: all registered levels, player-safe view.
async fn list_levels(State(state): State<Arc<AppState>>) -> Json<Vec<LevelSummary>> {
    let levels = state
        .registry
        .list()
        .iter()
        .map(|level| LevelSummary::from(level.as_ref()))
        .collect();
    Json(levels)
}

/// GET /levels/{name}: one level, or 404.
async fn get_level(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    match state.registry.resolve(&name) {
        Some(level) => Json(LevelSummary::from(level.as_ref())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("unknown character: {name}"),
        ),
    }
}

/// GET /health: liveness probe.
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "levels": state.registry.len(),
    }))
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
