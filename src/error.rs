//! Error taxonomy shared by the HTTP routes and the MCP tools

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rmcp::ErrorData as McpError;
use serde_json::json;
use thiserror::Error;

/// Every failure a gateway operation can surface to a caller
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Missing or malformed caller input
    #[error("{message}")]
    Validation { message: String },

    /// No route matches the request path
    #[error("Not found")]
    NotFound { path: String },

    /// The provider answered with a non-2xx status or an embedded error
    #[error("{message}")]
    Upstream { message: String },

    /// Network failures, undecodable bodies and anything else
    #[error("{message}")]
    Unhandled { message: String },
}

impl GatewayError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn unhandled<S: Into<String>>(message: S) -> Self {
        Self::Unhandled {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation { .. } => StatusCode::BAD_REQUEST,
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::Unhandled { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::unhandled(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "Request failed: {}", self);
        }

        let body = match &self {
            GatewayError::NotFound { path } => json!({ "error": "Not found", "path": path }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for McpError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation { message } => McpError::invalid_params(message, None),
            other => McpError::internal_error(other.to_string(), None),
        }
    }
}
