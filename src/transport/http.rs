//! HTTP transport implementation over reqwest.

use std::{sync::LazyLock, time::Duration};

use reqwest::Client;
use tracing::instrument;

use super::{RawResponse, RequestDescriptor, Transport, config::HttpConfig, sealed};
use crate::error::{GatewayError, Result};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Connection pooling and keep-alive come from the underlying client. The
/// transport carries no retry or redirect policy of its own.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Uses a shared singleton client for connection pooling efficiency.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 10
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    ///
    /// # Examples
    ///
    /// ```
    /// use xpay_client::transport::HttpTransport;
    ///
    /// let transport = HttpTransport::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// A client built this way is private to the transport; in particular,
    /// `danger_accept_invalid_certs` never affects any other client in the
    /// process.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or HTTP client
    /// creation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpay_client::transport::{HttpConfig, HttpTransport};
    ///
    /// let config = HttpConfig { timeout_secs: 60, ..Default::default() };
    /// let transport = HttpTransport::with_config(&config).unwrap();
    /// ```
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: RequestDescriptor<'_>) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.as_str())
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();
        let body = response.bytes().await.map_err(GatewayError::Http)?.to_vec();

        Ok(RawResponse { status, headers, body })
    }
}
