//! # didox-client -- Typed Rust client for the Didox partner API
//!
//! Provides typed access to the parts of the Didox e-document exchange API
//! that document issuance needs:
//! - **Auth** via `POST /v1/auth/{tin}/password/{locale}`
//! - **Documents** via `POST /v1/documents/{code}/create`
//!
//! Payloads come from the builders in `didox-documents`.
//!
//! ## Authentication
//!
//! Two credentials travel with each request: the partner token from
//! [`DidoxConfig`] as the `Partner-Authorization` default header, and the
//! per-user [`AuthToken`] returned by login as the `user-key` header on
//! document calls.

pub mod auth;
pub mod config;
pub mod documents;
pub mod error;
pub(crate) mod retry;

pub use auth::{AuthClient, AuthToken};
pub use config::{ConfigError, DidoxConfig, Environment};
pub use documents::{CreatedDocument, DocumentsClient};
pub use error::DidoxApiError;

use std::time::Duration;

/// Header carrying the partner token on every request.
pub const PARTNER_AUTH_HEADER: &str = "Partner-Authorization";

/// Top-level Didox client. Holds the per-area sub-clients.
#[derive(Debug, Clone)]
pub struct DidoxClient {
    auth: AuthClient,
    documents: DocumentsClient,
}

impl DidoxClient {
    /// Create a new client from configuration.
    pub fn new(config: DidoxConfig) -> Result<Self, DidoxApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                let mut value = reqwest::header::HeaderValue::from_str(config.partner_token.as_str())
                    .map_err(|_| DidoxApiError::Config(ConfigError::InvalidToken))?;
                value.set_sensitive(true);
                headers.insert(PARTNER_AUTH_HEADER, value);
                headers
            })
            .build()
            .map_err(|e| DidoxApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Didox client ready");
        Ok(Self {
            auth: AuthClient::new(http.clone(), config.clone()),
            documents: DocumentsClient::new(http, config),
        })
    }

    /// Client from `DIDOX_*` environment variables; see
    /// [`DidoxConfig::from_env`].
    pub fn from_env() -> Result<Self, DidoxApiError> {
        Self::new(DidoxConfig::from_env()?)
    }

    /// Access the auth client.
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Access the documents client.
    pub fn documents(&self) -> &DocumentsClient {
        &self.documents
    }
}
