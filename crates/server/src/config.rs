//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LARDER_HOST` - Bind address (default: 127.0.0.1)
//! - `LARDER_PORT` - Listen port (default: 3000)
//! - `RETAILER_API_BASE` - Retailer gateway base URL (default: <https://gw.grocer.example>)
//! - `RETAILER_SEARCH_BASE` - Storefront search page used for deep links
//! - `RETAILER_STORE_ID` - Default store to search against (default: 217)
//! - `RETAILER_AUTH_TOKEN` - Bearer token captured from the retailer mobile app
//! - `RETAILER_REFRESH_TOKEN` - Refresh token captured alongside it
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Larder application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Retailer gateway configuration
    pub retailer: RetailerConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Retailer gateway configuration.
///
/// Implements `Debug` manually to redact the captured tokens.
#[derive(Clone)]
pub struct RetailerConfig {
    /// Gateway base URL for catalog search and shopping-list calls
    pub api_base: String,
    /// Storefront search page used to synthesize deep-link URLs
    pub search_base: String,
    /// Default store to search against
    pub store_id: String,
    /// Bearer token captured out-of-band; absent means "not configured"
    pub auth_token: Option<SecretString>,
    /// Refresh token captured alongside the bearer token
    pub refresh_token: Option<SecretString>,
}

impl std::fmt::Debug for RetailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetailerConfig")
            .field("api_base", &self.api_base)
            .field("search_base", &self.search_base)
            .field("store_id", &self.store_id)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("LARDER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LARDER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("LARDER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("LARDER_PORT".to_string(), e.to_string()))?;

        let retailer = RetailerConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            retailer,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl RetailerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_base = get_validated_url("RETAILER_API_BASE", "https://gw.grocer.example")?;
        let search_base = get_validated_url(
            "RETAILER_SEARCH_BASE",
            "https://www.grocer.example/shopping/search",
        )?;

        Ok(Self {
            api_base,
            search_base,
            store_id: get_env_or_default("RETAILER_STORE_ID", "217"),
            auth_token: get_optional_secret("RETAILER_AUTH_TOKEN"),
            refresh_token: get_optional_secret("RETAILER_REFRESH_TOKEN"),
        })
    }

    /// Whether a bearer token was configured via the environment.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.auth_token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().is_empty())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as absent.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an optional environment variable as a secret.
fn get_optional_secret(key: &str) -> Option<SecretString> {
    get_optional_env(key).map(SecretString::from)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a URL-valued variable with a default, validated and stripped of any
/// trailing slash so paths can be appended with `format!`.
fn get_validated_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            retailer: RetailerConfig {
                api_base: "https://gw.grocer.example".to_string(),
                search_base: "https://www.grocer.example/shopping/search".to_string(),
                store_id: "217".to_string(),
                auth_token: None,
                refresh_token: None,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_has_token() {
        let mut config = RetailerConfig {
            api_base: "https://gw.grocer.example".to_string(),
            search_base: "https://www.grocer.example/shopping/search".to_string(),
            store_id: "217".to_string(),
            auth_token: None,
            refresh_token: None,
        };
        assert!(!config.has_token());

        config.auth_token = Some(SecretString::from(String::new()));
        assert!(!config.has_token());

        config.auth_token = Some(SecretString::from("tok_abc123"));
        assert!(config.has_token());
    }

    #[test]
    fn test_retailer_config_debug_redacts_tokens() {
        let config = RetailerConfig {
            api_base: "https://gw.grocer.example".to_string(),
            search_base: "https://www.grocer.example/shopping/search".to_string(),
            store_id: "217".to_string(),
            auth_token: Some(SecretString::from("super_secret_bearer_token")),
            refresh_token: Some(SecretString::from("super_secret_refresh_token")),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("gw.grocer.example"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_bearer_token"));
        assert!(!debug_output.contains("super_secret_refresh_token"));
    }

    #[test]
    fn test_validated_url_strips_trailing_slash() {
        let url = get_validated_url("LARDER_TEST_UNSET_URL", "https://gw.grocer.example/").unwrap();
        assert_eq!(url, "https://gw.grocer.example");
    }
}
