//! REST API handlers.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use super::types::{ExecRequest, ExecResponse};
use crate::execution::{CommandExecutor, ExecutorConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<CommandExecutor>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_executor(CommandExecutor::default())
    }

    pub fn with_config(config: ExecutorConfig) -> Self {
        Self::with_executor(CommandExecutor::new(config))
    }

    pub fn with_executor(executor: CommandExecutor) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "remote-exec",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Execute a single command and report its outcome.
///
/// The body is decoded here rather than through the `Json` extractor so that
/// malformed input gets the same response shape as every other outcome.
/// Rejected requests answer 400; everything else, including processes that
/// could not be started, answers 200 with the details in the body.
pub async fn execute(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<ExecResponse>) {
    let spec = ExecRequest::from_slice(&body)
        .and_then(|req| req.into_spec(state.executor.default_timeout()));

    let result = match spec {
        Ok(spec) => state.executor.execute(&spec).await,
        Err(err) => {
            tracing::debug!(error = %err, "rejecting exec request");
            err.into_result()
        }
    };

    let status = if result.status.is_rejection() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    (status, Json(result.into()))
}
