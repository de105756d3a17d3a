//! Client configuration.
//!
//! A [`ClientConfig`] carries the credential pair and gateway location.
//! Validation is synchronous and fatal: a client is never constructed from
//! an incomplete configuration, so credential problems surface immediately
//! rather than on the first call.

use serde::Deserialize;
use url::Url;

use crate::{
    error::{GatewayError, Result},
    transport::HttpConfig,
};

/// Configuration for a [`GatewayClient`](crate::GatewayClient).
///
/// # Examples
///
/// ```
/// use xpay_client::config::ClientConfig;
///
/// let config = ClientConfig::new(
///     "my-api-key",
///     "my-secret-key",
///     "https://sandbox.gateway.example.com/cybersource",
/// );
/// assert!(config.validate().is_ok());
/// ```
///
/// Or from TOML:
///
/// ```
/// use xpay_client::config::ClientConfig;
///
/// let config: ClientConfig = toml::from_str(
///     r#"
///     api_key = "my-api-key"
///     secret_key = "my-secret-key"
///     base_url = "https://sandbox.gateway.example.com/cybersource"
///
///     [http]
///     timeout_secs = 60
///     "#,
/// )
/// .unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Public API key, sent as the `apikey` query parameter on every call.
    pub api_key: String,

    /// Secret key, used only to compute tokens; never transmitted.
    pub secret_key: String,

    /// Gateway base URL, including any fixed prefix path
    /// (e.g. `https://sandbox.gateway.example.com/cybersource`).
    pub base_url: String,

    /// HTTP transport configuration.
    #[serde(default)]
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Creates a configuration with default transport settings.
    #[must_use]
    pub fn new(api_key: &str, secret_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            secret_key: secret_key.to_owned(),
            base_url: base_url.to_owned(),
            http: HttpConfig::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the API key or secret key is
    /// empty, [`GatewayError::InvalidBaseUrl`] if the base URL is empty,
    /// unparseable, or not `http`/`https`, and propagates transport
    /// configuration errors.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(GatewayError::Config("'api_key' must be specified".to_owned()));
        }
        if self.secret_key.is_empty() {
            return Err(GatewayError::Config("'secret_key' must be specified".to_owned()));
        }
        if self.base_url.is_empty() {
            return Err(GatewayError::InvalidBaseUrl(
                "base URL must be specified as a non-empty string".to_owned(),
            ));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(GatewayError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        self.http.validate()
    }
}
