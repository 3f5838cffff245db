//! Didox client configuration.
//!
//! One base URL per deployment environment plus the partner token issued to
//! the integrating application. Override via environment variables or
//! explicit construction for staging and tests.

use url::Url;
use zeroize::Zeroizing;

/// Production partner API.
pub const PRODUCTION_URL: &str = "https://api-partners.didox.uz";
/// Staging (test contour) partner API.
pub const STAGING_URL: &str = "https://stage.goodsign.biz";

/// Deployment environment selecting the default base URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Staging,
}

impl Environment {
    /// API root for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Staging => STAGING_URL,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" | "stage" | "test" => Ok(Self::Staging),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Configuration for connecting to the Didox partner API.
///
/// Custom `Debug` implementation redacts the `partner_token` field.
#[derive(Clone)]
pub struct DidoxConfig {
    /// Base URL every endpoint path is joined to.
    pub base_url: Url,
    /// Sent as `Partner-Authorization` on every request. Zeroed on drop.
    pub partner_token: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for DidoxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DidoxConfig")
            .field("base_url", &self.base_url)
            .field("partner_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DidoxConfig {
    /// Configuration for `environment` with the default timeout.
    pub fn new(environment: Environment, partner_token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("environment", environment.base_url())?,
            partner_token: Zeroizing::new(partner_token.to_string()),
            timeout_secs: 30,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DIDOX_ENV` (`production` or `staging`, default: `production`)
    /// - `DIDOX_BASE_URL` (default: the URL of `DIDOX_ENV`)
    /// - `DIDOX_PARTNER_TOKEN` (required)
    /// - `DIDOX_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let partner_token = std::env::var("DIDOX_PARTNER_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        let environment = match std::env::var("DIDOX_ENV") {
            Ok(name) => name.parse()?,
            Err(_) => Environment::default(),
        };

        Ok(Self {
            base_url: env_url("DIDOX_BASE_URL", environment.base_url())?,
            partner_token: Zeroizing::new(partner_token),
            timeout_secs: std::env::var("DIDOX_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed.
    pub fn local_mock(port: u16, partner_token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            partner_token: Zeroizing::new(partner_token.to_string()),
            timeout_secs: 5,
        })
    }

    /// Join an endpoint path onto the base URL, keeping any path prefix the
    /// base URL carries.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DIDOX_PARTNER_TOKEN environment variable is required")]
    MissingToken,
    #[error("unknown environment {0:?} (expected production or staging)")]
    UnknownEnvironment(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("partner token contains characters not allowed in an HTTP header")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = DidoxConfig::local_mock(9000, "partner").unwrap();
        assert_eq!(cfg.partner_token.as_str(), "partner");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn environments_map_to_hosts() {
        let prod = DidoxConfig::new(Environment::Production, "t").unwrap();
        assert_eq!(prod.base_url.as_str(), "https://api-partners.didox.uz/");
        let stage = DidoxConfig::new("staging".parse().unwrap(), "t").unwrap();
        assert_eq!(stage.base_url.as_str(), "https://stage.goodsign.biz/");
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = DidoxConfig::local_mock(9000, "super-secret").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let mut cfg = DidoxConfig::local_mock(9000, "t").unwrap();
        assert_eq!(cfg.endpoint("/v1/documents/002/create"), "http://127.0.0.1:9000/v1/documents/002/create");
        cfg.base_url = "https://proxy.example/didox/".parse().unwrap();
        assert_eq!(cfg.endpoint("v1/auth"), "https://proxy.example/didox/v1/auth");
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("DIDOX_NONEXISTENT_VAR_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("DIDOX_TEST_BAD_URL", "not a url");
        let result = env_url("DIDOX_TEST_BAD_URL", "https://example.com");
        std::env::remove_var("DIDOX_TEST_BAD_URL");
        assert!(result.is_err());
    }
}
