use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified error type for the proxy service.
///
/// Every failure maps to HTTP 500 and produces a JSON response body of the
/// form `{"error": "<message>"}`. The variant only drives log wording; the
/// caller-facing contract is the message text alone.
#[derive(Debug)]
pub enum ProxyError {
    MissingConfig(String),
    Auth(String),
    Upstream(String),
    InvalidResponse(String),
}

impl ProxyError {
    /// The message surfaced to the caller in the response body.
    pub fn message(&self) -> &str {
        match self {
            ProxyError::MissingConfig(msg)
            | ProxyError::Auth(msg)
            | ProxyError::Upstream(msg)
            | ProxyError::InvalidResponse(msg) => msg,
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MissingConfig(msg) => write!(f, "Missing configuration: {msg}"),
            ProxyError::Auth(msg) => write!(f, "Authentication failed: {msg}"),
            ProxyError::Upstream(msg) => write!(f, "Upstream error: {msg}"),
            ProxyError::InvalidResponse(msg) => write!(f, "Invalid upstream response: {msg}"),
        }
    }
}

impl std::error::Error for ProxyError {}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message() });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
