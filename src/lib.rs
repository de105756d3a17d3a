//! xpay-client: payment gateway client with x-pay-token request signing.
//!
//! A client library for a REST payment gateway (authorizations, captures,
//! sales, refunds, voids, credits) that authenticates every request with a
//! deterministic keyed token instead of a session or OAuth handshake.
//!
//! # How authentication works
//!
//! Each request carries an `x-pay-token` header:
//!
//! ```text
//! x-pay-token: x:<unix-timestamp>:<sha256-hex>
//! ```
//!
//! The digest is SHA-256 over `secretKey + timestamp + resourcePath +
//! canonicalQueryString + payload`, concatenated with no separators. The
//! gateway recomputes the digest with its copy of the secret key and a
//! clock-skew window; the secret key itself never crosses the wire. The
//! public API key rides along as the `apikey` query parameter on every
//! call, which also places it inside the signed material.
//!
//! Because the token is bound to the exact path, query parameter set, and
//! body it was computed over, signing is the last step before transmission:
//! the dispatcher freezes the request, signs it, and hands it to the
//! transport verbatim.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              GatewayClient                   │
//! │  typed operations over a declarative         │
//! │  endpoint table, one generic dispatch        │
//! └───────┬──────────────────────────┬───────────┘
//!         │                          │
//! ┌───────▼───────────┐   ┌──────────▼───────────┐
//! │    TokenSigner    │   │    HttpTransport     │
//! │  pure, per-request│   │  reqwest, pooled,    │
//! │  x-pay-token      │   │  no retries          │
//! └───────────────────┘   └──────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use xpay_client::{
//!     ClientConfig, GatewayClient,
//!     client::{AuthorizationRequest, CaptureRequest},
//! };
//!
//! # async fn example() -> xpay_client::error::Result<()> {
//! let config = ClientConfig::new(
//!     "my-api-key",
//!     "my-secret-key",
//!     "https://sandbox.gateway.example.com/cybersource",
//! );
//! let client = GatewayClient::new(&config)?;
//!
//! // Authorize, then capture.
//! let auth = AuthorizationRequest {
//!     amount: Decimal::new(10000, 2),
//!     currency: "USD".to_owned(),
//!     reference_id: Some("order-123".to_owned()),
//!     payment: None,
//!     extra: Default::default(),
//! };
//! let authorized = client.authorize(&auth).await?;
//!
//! if let Some(body) = authorized.body.as_json()
//!     && let Some(id) = body["id"].as_str()
//! {
//!     client.capture(id, &CaptureRequest::default()).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`token`]: the signing primitive (canonicalization, SHA-256 token)
//! - [`client`]: gateway operations, typed request bodies, dispatch
//! - [`transport`]: sealed HTTP transport over reqwest
//! - [`config`]: client configuration, validated at construction
//! - [`error`]: error taxonomy
//!
//! # Error model
//!
//! Configuration problems fail synchronously at construction. Everything
//! else (missing per-call parameters, transport failures, non-2xx gateway
//! answers) resolves as an `Err` from the operation future. This crate
//! never retries; retry policy belongs to the caller.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod token;
pub mod transport;

pub use client::GatewayClient;
pub use config::ClientConfig;
pub use error::{GatewayError, Result};
pub use token::{PayToken, QueryParams, TokenSigner, X_PAY_TOKEN_HEADER};
