//! HTTP transport abstraction.
//!
//! The dispatcher hands the transport a fully formed, already-signed request
//! descriptor and receives back the raw response. The transport performs the
//! wire call and nothing else: no retries, no redirect policy, no mutation
//! of the request (any mutation after signing would invalidate the token).
//!
//! The `Transport` trait is sealed; only implementations in this crate can
//! exist, so the sign-then-send contract cannot be bypassed.

use reqwest::Method;

use crate::error::Result;

pub mod config;
pub mod http;
mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// A fully formed request, signed and frozen.
///
/// Everything the token was computed over (path, query, body) is final by
/// the time a descriptor exists; the transport transmits it verbatim.
#[derive(Debug)]
pub struct RequestDescriptor<'a> {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query parameters, appended (URL-encoded) by the transport.
    pub query: Vec<(&'a str, &'a str)>,
    /// Request headers, including `x-pay-token`.
    pub headers: Vec<(&'a str, String)>,
    /// Serialized JSON body, if any.
    pub body: Option<String>,
}

/// Raw response handed back by the transport.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// The `content-type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }
}

/// Transport abstraction consumed by the dispatcher.
///
/// Sealed: implementations outside this crate are not possible.
pub trait Transport: sealed::private::Sealed {
    /// Executes a signed request and returns the raw response.
    ///
    /// A non-2xx status is NOT an error at this layer; classification into
    /// success and gateway rejection happens in the dispatcher, which still
    /// needs the response body either way.
    fn execute(
        &self,
        request: RequestDescriptor<'_>,
    ) -> impl Future<Output = Result<RawResponse>> + Send;
}
