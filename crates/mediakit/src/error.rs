//! Error types for MediaKit

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::types::{ErrorBody, Platform};

/// Message returned to callers for any upstream failure
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch media information";

/// Errors surfaced by the gateway to its callers
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required input missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Upstream provider could not deliver usable data
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl GatewayError {
    /// Error for a request without a source URL
    pub fn missing_url() -> Self {
        GatewayError::Validation("URL is required".to_string())
    }

    /// HTTP status used when this error reaches the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to expose to the caller
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Validation(msg) => msg.clone(),
            GatewayError::Upstream(_) => UPSTREAM_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::Upstream(ref cause) = self {
            // Full cause stays server-side
            tracing::error!(error = %cause, "Upstream request failed");
        }

        let body = Json(ErrorBody {
            error: self.public_message(),
        });
        (self.status_code(), body).into_response()
    }
}

/// Errors raised by platform adapters while talking to a provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Request exceeded the configured timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// Failed to connect to the provider
    #[error("Failed to connect to upstream")]
    Connect(#[source] reqwest::Error),

    /// Other request error
    #[error("Upstream request failed: {0}")]
    Request(String),

    /// Body was not valid JSON
    #[error("Upstream body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl UpstreamError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_connect() {
            UpstreamError::Connect(err)
        } else {
            // Strip the URL: query strings may carry caller data
            UpstreamError::Request(err.without_url().to_string())
        }
    }
}

/// Internal configuration problems
///
/// `MissingCredential` is never surfaced; the dispatcher answers it with
/// fixture data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No upstream key configured
    #[error("No upstream credential configured for {0}")]
    MissingCredential(Platform),

    /// Environment value could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(GatewayError::missing_url().to_string(), "URL is required");
        assert_eq!(
            UpstreamError::Status(503).to_string(),
            "Upstream returned HTTP 503"
        );
        assert_eq!(
            UpstreamError::Timeout.to_string(),
            "Upstream request timed out"
        );
        assert_eq!(
            ConfigurationError::MissingCredential(Platform::Tiktok).to_string(),
            "No upstream credential configured for tiktok"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::missing_url().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::from(UpstreamError::Status(404)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message_is_generic() {
        let err = GatewayError::from(UpstreamError::InvalidBody(
            "expected value at line 1 column 1".to_string(),
        ));
        assert_eq!(err.public_message(), UPSTREAM_ERROR_MESSAGE);
    }
}
