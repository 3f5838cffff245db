//! Typed client for Didox user authentication.
//!
//! A user (organisation by TIN, individual by PINFL) logs in with a
//! password and receives a user token. Every document call carries that
//! token in the `user-key` header.

use didox_core::{Locale, TinOrPinfl};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::DidoxConfig;
use crate::error::DidoxApiError;
use crate::retry::{retry_send, RetryPolicy};

// -- Types matching Didox API schemas -----------------------------------------

#[derive(Serialize)]
struct PasswordLoginRequest<'a> {
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// User token returned by login. Zeroed on drop; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a token obtained elsewhere (e.g. from a cache).
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Raw token for the `user-key` header.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

// -- Client -------------------------------------------------------------------

/// Client for the Didox auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: DidoxConfig,
}

impl AuthClient {
    pub(crate) fn new(http: reqwest::Client, config: DidoxConfig) -> Self {
        Self { http, config }
    }

    /// Log in with a password.
    ///
    /// Calls `POST {base_url}/v1/auth/{tin_or_pinfl}/password/{locale}`.
    pub async fn login_password(
        &self,
        login: &TinOrPinfl,
        password: &str,
        locale: Locale,
    ) -> Result<AuthToken, DidoxApiError> {
        let endpoint = "POST /v1/auth/{login}/password/{locale}";
        let url = self
            .config
            .endpoint(&format!("v1/auth/{}/password/{}", login.as_str(), locale.as_str()));
        let body = PasswordLoginRequest { password };

        tracing::debug!(endpoint, individual = login.is_individual(), %locale, "logging in");
        let resp = retry_send(endpoint, RetryPolicy::Transport, || self.http.post(&url).json(&body).send())
            .await
            .map_err(|e| DidoxApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status, "Didox login rejected");
            return Err(DidoxApiError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let parsed: LoginResponse = resp.json().await.map_err(|e| DidoxApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        Ok(AuthToken::new(parsed.token))
    }
}
