//! Token generation for x-pay-token authentication.
//!
//! This module implements the gateway's keyed request-signing scheme. Every
//! outgoing request carries an `x-pay-token` header whose value proves
//! possession of the secret key without ever transmitting it:
//!
//! ```text
//! x-pay-token: x:<unix-timestamp>:<sha256-hex>
//! ```
//!
//! The digest covers the concatenation, with no separators, of:
//!
//! ```text
//! secretKey + timestamp + resourcePath + canonicalQueryString + payload
//! ```
//!
//! where the resource path has exactly one leading `/` stripped, the query
//! string is the request's query parameters joined as `k1=v1&k2=v2` in
//! ascending code-point key order, and the payload is the JSON-serialized
//! request body (empty for bodyless requests).
//!
//! The API key is *not* part of the signed material directly; it is covered
//! only through the `apikey` query parameter, which the dispatcher always
//! includes. This is the gateway's actual verification contract and must not
//! be "corrected" client-side.
//!
//! # Examples
//!
//! ```
//! use xpay_client::token::{QueryParams, TokenSigner};
//!
//! let signer = TokenSigner::new("my-api-key", "my-secret");
//!
//! let mut query = QueryParams::new();
//! query.insert("apikey", "my-api-key");
//!
//! let token = signer.generate_token("/payments/v1/sales", &query, None);
//! assert!(token.header_value().starts_with("x:"));
//! ```

use std::{
    collections::BTreeMap,
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{instrument, warn};
use zeroize::Zeroizing;

#[cfg(test)]
mod tests;

/// Header name the token is attached under.
pub const X_PAY_TOKEN_HEADER: &str = "x-pay-token";

/// Fixed scheme prefix of every token.
const TOKEN_SCHEME: &str = "x";

/// Query parameters of a signable request.
///
/// Keys are kept in ascending code-point order so the canonical form is
/// independent of insertion order. Values are inserted in their natural
/// string form with no percent-encoding; only scalar values are
/// representable, so the coercion of structured values never arises.
///
/// # Examples
///
/// ```
/// use xpay_client::token::QueryParams;
///
/// let mut a = QueryParams::new();
/// a.insert("offset", 0u64);
/// a.insert("apikey", "key");
///
/// let mut b = QueryParams::new();
/// b.insert("apikey", "key");
/// b.insert("offset", 0u64);
///
/// // Canonical form is order-independent.
/// assert_eq!(a.canonical_string(), b.canonical_string());
/// assert_eq!(a.canonical_string(), "apikey=key&offset=0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.insert(key.into(), value.to_string());
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if no parameters have been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates parameters in canonical (ascending key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds the canonical `k1=v1&k2=v2` string in sorted key order.
    ///
    /// Empty when no parameters are present. Values appear verbatim; the
    /// canonical string is signing material, not a URL, so no escaping is
    /// applied.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

/// A generated x-pay-token.
///
/// Bound to the exact (resource path, query parameter set, payload) it was
/// computed over and to one timestamp; mutating any of those after signing
/// yields a token the gateway will reject. Single-use in practice, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayToken {
    /// Unix timestamp (whole seconds) captured at signing.
    pub timestamp: u64,
    /// Lowercase hexadecimal SHA-256 digest of the signing input.
    pub digest: String,
}

impl PayToken {
    /// Renders the token as the `x-pay-token` header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpay_client::token::PayToken;
    ///
    /// let token = PayToken { timestamp: 1000, digest: "abc123".to_owned() };
    /// assert_eq!(token.header_value(), "x:1000:abc123");
    /// ```
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{TOKEN_SCHEME}:{}:{}", self.timestamp, self.digest)
    }
}

impl fmt::Display for PayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TOKEN_SCHEME}:{}:{}", self.timestamp, self.digest)
    }
}

/// Generates x-pay-tokens for gateway requests.
///
/// Holds the immutable credential pair for the lifetime of a client. The
/// secret key lives in zeroizing storage and is excluded from `Debug`
/// output; it is used only to compute digests and is never transmitted.
///
/// The signer is pure (given a timestamp) and safe to use from concurrent
/// tasks without coordination.
pub struct TokenSigner {
    api_key: String,
    secret_key: Zeroizing<String>,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from a credential pair.
    ///
    /// Credential presence is enforced at client construction
    /// ([`ClientConfig::validate`](crate::config::ClientConfig::validate)),
    /// not here.
    #[must_use]
    pub fn new(api_key: &str, secret_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            secret_key: Zeroizing::new(secret_key.to_owned()),
        }
    }

    /// The public API key, sent as the `apikey` query parameter.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Generates a token for the current time.
    ///
    /// Captures `SystemTime::now()` as whole Unix seconds and delegates to
    /// [`generate_token_at`](Self::generate_token_at). Must be called only
    /// after path, query parameters, and payload are final.
    #[must_use]
    pub fn generate_token(
        &self,
        resource_path: &str,
        query: &QueryParams,
        payload: Option<&str>,
    ) -> PayToken {
        self.generate_token_at(unix_timestamp(), resource_path, query, payload)
    }

    /// Generates a token for an explicit timestamp.
    ///
    /// Pure: identical inputs always produce the identical token. `payload`
    /// is the already-serialized JSON body, or `None` for bodyless requests;
    /// the dispatcher signs the exact bytes it transmits.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpay_client::token::{QueryParams, TokenSigner};
    ///
    /// let signer = TokenSigner::new("key", "secret");
    /// let query = QueryParams::new();
    ///
    /// // Signing input is "secret" + "1000" + "a": sha256("secret1000a").
    /// let token = signer.generate_token_at(1000, "/a", &query, None);
    /// assert_eq!(
    ///     token.digest,
    ///     "e599e1fc455a6bf8cf023684351ab692e1a5ad8867fb0e232910050134810d36",
    /// );
    /// ```
    #[instrument(skip(self, query, payload), fields(resource_path, timestamp))]
    #[must_use]
    pub fn generate_token_at(
        &self,
        timestamp: u64,
        resource_path: &str,
        query: &QueryParams,
        payload: Option<&str>,
    ) -> PayToken {
        let input = self.signing_input(timestamp, resource_path, query, payload);
        let digest = hex::encode(Sha256::digest(input.as_bytes()));
        PayToken { timestamp, digest }
    }

    /// Deferred variant of [`generate_token`](Self::generate_token).
    ///
    /// Observably equivalent to the synchronous form: yields to the runtime
    /// once, then computes the same value for the same inputs and timestamp.
    /// Exists for API ergonomics only and introduces no failure path.
    pub async fn generate_token_deferred(
        &self,
        resource_path: &str,
        query: &QueryParams,
        payload: Option<&str>,
    ) -> PayToken {
        let timestamp = unix_timestamp();
        tokio::task::yield_now().await;
        self.generate_token_at(timestamp, resource_path, query, payload)
    }

    /// Builds the exact concatenation the digest is computed over.
    ///
    /// `secretKey + timestamp + path-without-leading-slash + canonicalQuery
    /// + payload`, no separators. The leading `/` is assumed present and
    /// exactly one is stripped.
    fn signing_input(
        &self,
        timestamp: u64,
        resource_path: &str,
        query: &QueryParams,
        payload: Option<&str>,
    ) -> String {
        let resource = resource_path.strip_prefix('/').unwrap_or(resource_path);
        let mut input = String::with_capacity(
            self.secret_key.len()
                + 20
                + resource.len()
                + payload.map_or(0, str::len),
        );
        input.push_str(&self.secret_key);
        input.push_str(&timestamp.to_string());
        input.push_str(resource);
        input.push_str(&query.canonical_string());
        if let Some(payload) = payload {
            input.push_str(payload);
        }
        input
    }
}

/// Serializes a request body for signing and transmission.
///
/// Returns `None` when serialization fails; the request then proceeds as if
/// the payload were absent rather than failing the call. `serde_json` cannot
/// produce cyclic structures, so failures are limited to exotic cases such
/// as non-string map keys.
pub fn serialize_payload<T: Serialize + ?Sized>(payload: &T) -> Option<String> {
    match serde_json::to_string(payload) {
        Ok(json) => Some(json),
        Err(err) => {
            warn!(error = %err, "payload serialization failed; signing without payload");
            None
        }
    }
}

/// Current Unix time in whole seconds.
fn unix_timestamp() -> u64 {
    // A clock before the epoch is not a recoverable condition for a signer
    // whose contract is "seconds since the epoch"; saturate to zero.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
mod unit_tests {
    use serde_json::json;

    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("key", "secret")
    }

    #[test]
    fn pinned_vector_bodyless_no_query() {
        // sha256("secret1000a")
        let token = signer().generate_token_at(1000, "/a", &QueryParams::new(), None);
        assert_eq!(
            token.digest,
            "e599e1fc455a6bf8cf023684351ab692e1a5ad8867fb0e232910050134810d36"
        );
        assert_eq!(
            token.header_value(),
            "x:1000:e599e1fc455a6bf8cf023684351ab692e1a5ad8867fb0e232910050134810d36"
        );
    }

    #[test]
    fn pinned_vector_with_query() {
        // sha256("secret1000payments/v1/salesapikey=key&limit=5&offset=0")
        let mut query = QueryParams::new();
        query.insert("offset", 0u64);
        query.insert("apikey", "key");
        query.insert("limit", 5u64);

        let token = signer().generate_token_at(1000, "/payments/v1/sales", &query, None);
        assert_eq!(
            token.digest,
            "84b62bb196834e3dbf93cdbabb2efbe773cf14c66ef2a70733f91151fa5838f6"
        );
    }

    #[test]
    fn pinned_vector_with_payload() {
        // sha256("secret1000payments/v1/authorizationsapikey=key{\"amount\":\"100.00\"}")
        let mut query = QueryParams::new();
        query.insert("apikey", "key");

        let payload = serialize_payload(&json!({"amount": "100.00"})).unwrap();
        let token = signer().generate_token_at(
            1000,
            "/payments/v1/authorizations",
            &query,
            Some(&payload),
        );
        assert_eq!(
            token.digest,
            "11b1d3413172839b83e1fa0249f08f598a2d178df3f9e941737ef2f2ff1868fb"
        );
    }

    #[test]
    fn determinism() {
        let mut query = QueryParams::new();
        query.insert("apikey", "key");
        let a = signer().generate_token_at(1234, "/payments/v1/sales", &query, None);
        let b = signer().generate_token_at(1234, "/payments/v1/sales", &query, None);
        assert_eq!(a, b);
    }

    #[test]
    fn timestamp_changes_token() {
        let query = QueryParams::new();
        let a = signer().generate_token_at(1000, "/a", &query, None);
        let b = signer().generate_token_at(1001, "/a", &query, None);
        assert_ne!(a.digest, b.digest);
        // sha256("secret1001a")
        assert_eq!(
            b.digest,
            "5644b867ce2f56e83326665177a163b3899eebb3fa91c0fe38d3b2c47070cc4e"
        );
    }

    #[test]
    fn path_changes_token() {
        let query = QueryParams::new();
        let sales = signer().generate_token_at(1000, "/payments/v1/sales", &query, None);
        let captures = signer().generate_token_at(1000, "/payments/v1/captures", &query, None);
        assert_ne!(sales.digest, captures.digest);
        assert_eq!(
            sales.digest,
            "0346de26d8768ffde63f5995d69499965381e95c4dee0e36cd1d4299ddfd0e16"
        );
        assert_eq!(
            captures.digest,
            "938b81e77cd0fbec09835d1a83b64c3f13bc4e018eadacb6080f0c845d7db21e"
        );
    }

    #[test]
    fn payload_changes_token() {
        let query = QueryParams::new();
        let absent = signer().generate_token_at(1000, "/a", &query, None);
        let body = serialize_payload(&json!({"amount": "1.00"})).unwrap();
        let present = signer().generate_token_at(1000, "/a", &query, Some(&body));
        assert_ne!(absent.digest, present.digest);
    }

    #[test]
    fn query_order_is_irrelevant() {
        let mut forward = QueryParams::new();
        forward.insert("a", 1u32);
        forward.insert("b", 2u32);

        let mut reverse = QueryParams::new();
        reverse.insert("b", 2u32);
        reverse.insert("a", 1u32);

        let x = signer().generate_token_at(1000, "/a", &forward, None);
        let y = signer().generate_token_at(1000, "/a", &reverse, None);
        assert_eq!(x, y);
    }

    #[test]
    fn canonical_string_shapes() {
        assert_eq!(QueryParams::new().canonical_string(), "");

        let mut query = QueryParams::new();
        query.insert("apikey", "key");
        assert_eq!(query.canonical_string(), "apikey=key");

        query.insert("offset", 10u64);
        assert_eq!(query.canonical_string(), "apikey=key&offset=10");
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut query = QueryParams::new();
        query.insert("limit", 5u64);
        query.insert("limit", 10u64);
        assert_eq!(query.canonical_string(), "limit=10");
        assert_eq!(query.len(), 1);
    }

    #[tokio::test]
    async fn deferred_matches_sync_for_same_timestamp() {
        let signer = signer();
        let mut query = QueryParams::new();
        query.insert("apikey", "key");

        let deferred = signer
            .generate_token_deferred("/payments/v1/sales", &query, None)
            .await;
        let sync =
            signer.generate_token_at(deferred.timestamp, "/payments/v1/sales", &query, None);
        assert_eq!(deferred, sync);
    }

    #[test]
    fn debug_redacts_secret() {
        let signer = TokenSigner::new("key", "hunter2");
        let rendered = format!("{signer:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn display_matches_header_value() {
        let token = PayToken { timestamp: 42, digest: "deadbeef".to_owned() };
        assert_eq!(token.to_string(), token.header_value());
    }
}
