//! Operational HTTP endpoints.
//!
//! - `/metrics` : JSON snapshot of memory statistics and every handler's internal metrics

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use agentmon_core::AgentError;

use crate::app_state::AppState;

/// Builds the snapshot on the blocking pool; the memory probe reads files.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let built = tokio::task::spawn_blocking(move || state.build_response())
        .await
        .unwrap_or_else(|e| Err(AgentError::Internal(format!("snapshot task failed: {e}"))));

    match built {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "snapshot build failed");
            error_response(&e)
        }
    }
}

/// 500 with a JSON error body; affects only the current request.
pub fn error_response(err: &AgentError) -> Response {
    let body = json!({
        "error": {
            "code": err.code().as_str(),
            "msg": err.to_string(),
        }
    })
    .to_string();

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
