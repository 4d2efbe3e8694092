//! API routes for the better-prompt server

use super::AppState;
use crate::ai::AiError;
use crate::models::{
    ErrorBody, HealthResponse, ImproveRequest, ImproveResponse, ScoreRecord, ScoreRequest,
};
use crate::scoring;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;
type ApiError = (StatusCode, Json<ErrorBody>);

const MSG_MISCONFIGURED: &str = "Server misconfigured";
const MSG_PROMPT_REQUIRED: &str = "Prompt required";
const MSG_INVALID_BODY: &str = "Invalid JSON body";
const MSG_REQUEST_FAILED: &str = "Request failed";
const MSG_TOO_LARGE: &str = "Request body too large";

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody::new(message)))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection);
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return api_error(StatusCode::PAYLOAD_TOO_LARGE, MSG_TOO_LARGE);
    }
    api_error(StatusCode::BAD_REQUEST, MSG_INVALID_BODY)
}

// ============================================================================
// Improve Routes
// ============================================================================

pub fn improve_routes() -> Router<AppStateArc> {
    Router::new().route("/api/improve", post(improve))
}

async fn improve(
    State(state): State<AppStateArc>,
    payload: Result<Json<ImproveRequest>, JsonRejection>,
) -> Result<Json<ImproveResponse>, ApiError> {
    let Some(improver) = state.improver.clone() else {
        error!("Improve request received but no oracle is configured");
        return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, MSG_MISCONFIGURED));
    };

    let Json(req) = payload.map_err(invalid_body)?;
    let prompt = req.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, MSG_PROMPT_REQUIRED));
    }

    info!(
        "Improving prompt ({} chars) with {}",
        prompt.chars().count(),
        improver.name()
    );

    // The oracle blocks on network I/O
    let result = tokio::task::spawn_blocking(move || improver.improve(&prompt))
        .await
        .map_err(|e| {
            error!("Improvement task failed: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, MSG_REQUEST_FAILED)
        })?;

    match result {
        Ok(output) => Ok(Json(ImproveResponse::scored(output))),
        Err(e) => {
            error!("Improvement failed: {}", e);
            Err(oracle_error(e))
        }
    }
}

/// Map an oracle failure to the status and message the client sees
fn oracle_error(err: AiError) -> ApiError {
    match err {
        AiError::ApiError { status, message } => {
            let status = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            api_error(status, message)
        }
        AiError::EmptyPrompt => api_error(StatusCode::BAD_REQUEST, MSG_PROMPT_REQUIRED),
        AiError::MissingApiKey { .. } | AiError::ConfigError(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, MSG_MISCONFIGURED)
        }
        AiError::Transport(_) | AiError::ParseError(_) | AiError::EmptyCompletion => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, MSG_REQUEST_FAILED)
        }
    }
}

// ============================================================================
// Score Routes
// ============================================================================

pub fn score_routes() -> Router<AppStateArc> {
    Router::new().route("/api/score", post(score_text))
}

/// Score arbitrary text with the shared scorer (client-side fallback)
async fn score_text(
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreRecord>, ApiError> {
    let Json(req) = payload.map_err(invalid_body)?;
    Ok(Json(scoring::score(&req.text)))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let oracle = state.improver.as_ref().map(|i| i.name());
    Json(HealthResponse {
        status: if oracle.is_some() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        oracle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_forwarded() {
        let (status, Json(body)) = oracle_error(AiError::ApiError {
            status: 402,
            message: "Insufficient Balance".into(),
        });
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body.error, "Insufficient Balance");
    }

    #[test]
    fn test_non_error_upstream_status_becomes_bad_gateway() {
        let (status, _) = oracle_error(AiError::ApiError {
            status: 302,
            message: "moved".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = oracle_error(AiError::ApiError {
            status: 0,
            message: "weird".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_transport_failures_are_generic() {
        for err in [
            AiError::Transport("connection refused".into()),
            AiError::ParseError("expected value".into()),
            AiError::EmptyCompletion,
        ] {
            let (status, Json(body)) = oracle_error(err);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.error, MSG_REQUEST_FAILED);
        }
    }

    #[test]
    fn test_missing_key_is_misconfiguration() {
        let (status, Json(body)) = oracle_error(AiError::MissingApiKey {
            env_var: "DEEPSEEK_API_KEY".into(),
            signup_url: String::new(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, MSG_MISCONFIGURED);
    }
}
