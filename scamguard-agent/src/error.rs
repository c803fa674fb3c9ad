//! Agent error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// No stored credential. The instruction string is fixed and shown to the
    /// user verbatim.
    #[error("Not signed in. Open the extension popup and sign in to run scans.")]
    NotSignedIn,

    /// No backend endpoint configured; requests are never attempted against
    /// an undefined target.
    #[error("No backend endpoint configured. Set the backend URL in settings.")]
    NotConfigured,

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let status = match &self {
            AgentError::NotSignedIn => StatusCode::UNAUTHORIZED,
            AgentError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AgentError::MissingInput(_) | AgentError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            AgentError::Backend(msg) => {
                tracing::warn!("Backend error: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AgentError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = json!({ "success": false, "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
