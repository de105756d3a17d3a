//! Error types for gateway client operations.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`GatewayError::Config`]): fatal, raised
//!   synchronously when a client is constructed; never retried.
//! - **Parameter errors** ([`GatewayError::MissingParameter`]): a required
//!   per-call value was absent or empty; rejected before any network I/O.
//! - **Transport errors** ([`GatewayError::Http`]): connection, DNS, or TLS
//!   failures surfaced from the HTTP layer; never retried by this crate.
//! - **Gateway rejections** ([`GatewayError::Api`]): non-2xx responses,
//!   carrying the decoded (or raw) response body. Distinct from transport
//!   errors: the request reached the gateway and was answered.
//!
//! # Examples
//!
//! ```
//! use xpay_client::error::{GatewayError, Result};
//!
//! fn require_id(id: &str) -> Result<()> {
//!     if id.is_empty() {
//!         return Err(GatewayError::MissingParameter("id".to_owned()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::client::ResponseBody;

/// Result type alias for gateway operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while talking to the payment gateway.
///
/// Failures surface as `Err` values through the asynchronous operations;
/// only [`Config`](Self::Config) is raised synchronously, at client
/// construction. There is no automatic retry anywhere in this crate;
/// retry policy, if any, belongs to the caller.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client configuration is invalid.
    ///
    /// Raised immediately by [`GatewayClient::new`](crate::GatewayClient::new)
    /// when the API key, secret key, or base URL is missing or empty. A
    /// client is never constructed with incomplete credentials; this error
    /// is never deferred to the first call.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Base URL could not be parsed or uses a rejected scheme.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A required per-operation parameter was absent or empty.
    ///
    /// Surfaced before any request is built or sent; no partial request
    /// reaches the wire.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// HTTP transport failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusal, DNS and TLS
    /// failures. The gateway never saw (or never answered) the request.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    ///
    /// Carries the response body, JSON-decoded when the content type
    /// indicated JSON and decoding succeeded, raw bytes otherwise. Gateway
    /// error payloads typically describe the rejection reason.
    #[error("gateway returned status {status}")]
    Api {
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body as received, decoded on a best-effort basis.
        body: ResponseBody,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = GatewayError::Config("'secretKey' must be specified".into());
        assert_eq!(
            error.to_string(),
            "invalid client configuration: 'secretKey' must be specified"
        );
    }

    #[test]
    fn test_missing_parameter_display() {
        let error = GatewayError::MissingParameter("id".into());
        assert_eq!(error.to_string(), "missing required parameter: id");
    }

    #[test]
    fn test_api_error_display() {
        let error = GatewayError::Api { status: 401, body: ResponseBody::Raw(Vec::new()) };
        assert_eq!(error.to_string(), "gateway returned status 401");
    }
}
