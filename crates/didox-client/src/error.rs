//! Didox client error types.

use didox_core::ValidationError;
use didox_documents::BuildError;

/// Errors from Didox API calls.
#[derive(Debug, thiserror::Error)]
pub enum DidoxApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Didox returned a non-2xx status.
    #[error("Didox API {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// The builder refused to produce a payload; nothing was sent.
    #[error("document build failed: {0}")]
    Build(#[from] BuildError),
    /// A request parameter failed client-side validation; nothing was sent.
    #[error("invalid request parameter: {0}")]
    Validation(#[from] ValidationError),
}

impl DidoxApiError {
    /// HTTP status of an `ApiError`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
