//! Gateway client and request dispatcher.
//!
//! One generic dispatch routine drives every operation in the
//! [`endpoint`] table: render the resource path, build the query parameter
//! set (always including `apikey`), serialize the optional JSON body, sign,
//! attach the `x-pay-token` header, hand the frozen request to the
//! transport, and classify the outcome. The per-operation methods differ
//! only in which table entry, id, paging, and body they supply.

mod endpoint;
pub mod models;
mod params;
mod response;

use tracing::instrument;

pub use models::{
    AuthorizationRequest, CaptureRequest, CreditRequest, PaymentCard, RefundRequest, SaleRequest,
    SearchRequest, VoidRequest,
};
pub use params::PageParams;
pub use response::{ApiResponse, ResponseBody};

use crate::{
    client::endpoint::Endpoint,
    config::ClientConfig,
    error::{GatewayError, Result},
    token::{QueryParams, TokenSigner, X_PAY_TOKEN_HEADER, serialize_payload},
    transport::{HttpTransport, RawResponse, RequestDescriptor, Transport},
};

/// Client for an x-pay-token authenticated payment gateway.
///
/// Holds the immutable credential pair and a pooled HTTP transport. A client
/// is cheap to share: operations take `&self`, keep no shared mutable state,
/// and may be issued concurrently.
///
/// # Examples
///
/// ```no_run
/// use rust_decimal::Decimal;
/// use xpay_client::{ClientConfig, GatewayClient, client::AuthorizationRequest};
///
/// # async fn example() -> xpay_client::error::Result<()> {
/// let config = ClientConfig::new(
///     "my-api-key",
///     "my-secret-key",
///     "https://sandbox.gateway.example.com/cybersource",
/// );
/// let client = GatewayClient::new(&config)?;
///
/// let request = AuthorizationRequest {
///     amount: Decimal::new(10000, 2),
///     currency: "USD".to_owned(),
///     reference_id: Some("order-123".to_owned()),
///     payment: None,
///     extra: Default::default(),
/// };
///
/// let response = client.authorize(&request).await?;
/// println!("status {}: {}", response.status, response.body.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GatewayClient {
    base_url: String,
    signer: TokenSigner,
    transport: HttpTransport,
}

impl GatewayClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] or [`GatewayError::InvalidBaseUrl`]
    /// synchronously when the configuration is incomplete. A client with
    /// missing credentials is never constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            signer: TokenSigner::new(&config.api_key, &config.secret_key),
            transport: HttpTransport::with_config(&config.http)?,
        })
    }

    /// The gateway base URL this client talks to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The signer holding this client's credential pair.
    #[must_use]
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Generic dispatch: the one routine behind every operation.
    ///
    /// Signing happens strictly after path, query, and body are final; the
    /// descriptor handed to the transport is exactly what was signed.
    #[instrument(skip(self, page, body), fields(operation = endpoint.name, id))]
    async fn dispatch(
        &self,
        endpoint: &Endpoint,
        id: Option<&str>,
        page: PageParams,
        body: Option<String>,
    ) -> Result<ApiResponse> {
        let path = endpoint.render_path(id)?;

        let mut query = QueryParams::new();
        query.insert("apikey", self.signer.api_key());
        page.apply(&mut query);

        let token = self.signer.generate_token(&path, &query, body.as_deref());

        let mut headers: Vec<(&str, String)> = vec![
            ("accept", "*/*".to_owned()),
            (X_PAY_TOKEN_HEADER, token.header_value()),
        ];
        if body.is_some() {
            headers.push(("content-type", "application/json".to_owned()));
        }

        let raw = self
            .transport
            .execute(RequestDescriptor {
                method: endpoint.method.clone(),
                url: format!("{}{path}", self.base_url),
                query: query.iter().collect(),
                headers,
                body,
            })
            .await?;

        let content_type = raw.content_type().map(str::to_owned);
        let RawResponse { status, headers, body } = raw;
        let body = response::ResponseBody::from_parts(content_type.as_deref(), body);

        if (200..300).contains(&status) {
            Ok(ApiResponse { status, headers, body })
        } else {
            Err(GatewayError::Api { status, body })
        }
    }

    /// Searches submitted transactions.
    pub async fn search_payments(
        &self,
        request: &SearchRequest,
        page: PageParams,
    ) -> Result<ApiResponse> {
        self.dispatch(&endpoint::SEARCH_PAYMENTS, None, page, serialize_payload(request))
            .await
    }

    /// Fetches one transaction from the search index by id.
    pub async fn get_payment(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_PAYMENT, Some(id), PageParams::default(), None).await
    }

    /// Authorizes a payment without capturing it.
    pub async fn authorize(&self, request: &AuthorizationRequest) -> Result<ApiResponse> {
        self.dispatch(&endpoint::AUTHORIZE, None, PageParams::default(), serialize_payload(request))
            .await
    }

    /// Lists authorizations.
    pub async fn find_authorizations(&self, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_AUTHORIZATIONS, None, page, None).await
    }

    /// Fetches an authorization by id.
    pub async fn get_authorization(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_AUTHORIZATION, Some(id), PageParams::default(), None)
            .await
    }

    /// Performs a sale: an authorization captured immediately.
    pub async fn sale(&self, request: &SaleRequest) -> Result<ApiResponse> {
        self.dispatch(&endpoint::SALE, None, PageParams::default(), serialize_payload(request))
            .await
    }

    /// Lists sales.
    pub async fn find_sales(&self, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_SALES, None, page, None).await
    }

    /// Fetches a sale by id.
    pub async fn get_sale(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_SALE, Some(id), PageParams::default(), None).await
    }

    /// Captures a previously authorized payment.
    pub async fn capture(&self, id: &str, request: &CaptureRequest) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::CAPTURE,
            Some(id),
            PageParams::default(),
            serialize_payload(request),
        )
        .await
    }

    /// Lists the captures performed against an authorization.
    pub async fn find_authorization_captures(
        &self,
        id: &str,
        page: PageParams,
    ) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_AUTHORIZATION_CAPTURES, Some(id), page, None).await
    }

    /// Fetches a capture by id.
    pub async fn get_capture(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_CAPTURE, Some(id), PageParams::default(), None).await
    }

    /// Lists captures.
    pub async fn find_captures(&self, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_CAPTURES, None, page, None).await
    }

    /// Refunds a capture. The body is optional; an absent body refunds in
    /// full per the gateway's defaulting rules.
    pub async fn refund_capture(
        &self,
        id: &str,
        request: Option<&RefundRequest>,
    ) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::REFUND_CAPTURE,
            Some(id),
            PageParams::default(),
            request.and_then(serialize_payload),
        )
        .await
    }

    /// Lists the refunds issued against a capture.
    pub async fn find_capture_refunds(&self, id: &str, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_CAPTURE_REFUNDS, Some(id), page, None).await
    }

    /// Refunds a sale. The body is optional, as for
    /// [`refund_capture`](Self::refund_capture).
    pub async fn refund_sale(
        &self,
        id: &str,
        request: Option<&RefundRequest>,
    ) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::REFUND_SALE,
            Some(id),
            PageParams::default(),
            request.and_then(serialize_payload),
        )
        .await
    }

    /// Lists the refunds issued against a sale.
    pub async fn find_sale_refunds(&self, id: &str, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_SALE_REFUNDS, Some(id), page, None).await
    }

    /// Lists refunds.
    pub async fn find_refunds(&self, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_REFUNDS, None, page, None).await
    }

    /// Fetches a refund by id.
    pub async fn get_refund(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_REFUND, Some(id), PageParams::default(), None).await
    }

    /// Voids a capture before settlement.
    pub async fn void_capture(
        &self,
        id: &str,
        request: Option<&VoidRequest>,
    ) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::VOID_CAPTURE,
            Some(id),
            PageParams::default(),
            request.and_then(serialize_payload),
        )
        .await
    }

    /// Voids a refund before settlement.
    pub async fn void_refund(
        &self,
        id: &str,
        request: Option<&VoidRequest>,
    ) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::VOID_REFUND,
            Some(id),
            PageParams::default(),
            request.and_then(serialize_payload),
        )
        .await
    }

    /// Voids a sale before settlement.
    pub async fn void_sale(&self, id: &str, request: Option<&VoidRequest>) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::VOID_SALE,
            Some(id),
            PageParams::default(),
            request.and_then(serialize_payload),
        )
        .await
    }

    /// Fetches a void by id.
    pub async fn get_void(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_VOID, Some(id), PageParams::default(), None).await
    }

    /// Credits funds to a card outside any prior transaction.
    pub async fn credit(&self, request: &CreditRequest) -> Result<ApiResponse> {
        self.dispatch(&endpoint::CREDIT, None, PageParams::default(), serialize_payload(request))
            .await
    }

    /// Lists credits.
    pub async fn find_credits(&self, page: PageParams) -> Result<ApiResponse> {
        self.dispatch(&endpoint::FIND_CREDITS, None, page, None).await
    }

    /// Fetches a credit by id.
    pub async fn get_credit(&self, id: &str) -> Result<ApiResponse> {
        self.dispatch(&endpoint::GET_CREDIT, Some(id), PageParams::default(), None).await
    }

    /// Voids a credit before settlement.
    pub async fn void_credit(
        &self,
        id: &str,
        request: Option<&VoidRequest>,
    ) -> Result<ApiResponse> {
        self.dispatch(
            &endpoint::VOID_CREDIT,
            Some(id),
            PageParams::default(),
            request.and_then(serialize_payload),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("key", "secret", "https://sandbox.example.com/pay/")
    }

    #[test]
    fn test_construction_trims_trailing_slash() {
        let client = GatewayClient::new(&config()).unwrap();
        assert_eq!(client.base_url(), "https://sandbox.example.com/pay");
    }

    #[test]
    fn test_missing_secret_rejected_at_construction() {
        let config = ClientConfig::new("key", "", "https://sandbox.example.com");
        let result = GatewayClient::new(&config);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_missing_api_key_rejected_at_construction() {
        let config = ClientConfig::new("", "secret", "https://sandbox.example.com");
        assert!(matches!(GatewayClient::new(&config), Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_id_rejects_before_any_request() {
        let client = GatewayClient::new(&config()).unwrap();

        let result = client.capture("", &CaptureRequest::default()).await;
        assert!(matches!(result, Err(GatewayError::MissingParameter(_))));

        let result = client.get_refund("").await;
        assert!(matches!(result, Err(GatewayError::MissingParameter(_))));

        let result = client.void_sale("", None).await;
        assert!(matches!(result, Err(GatewayError::MissingParameter(_))));
    }

    #[test]
    fn test_client_debug_redacts_secret() {
        let config = ClientConfig::new("key", "hunter2", "https://sandbox.example.com");
        let client = GatewayClient::new(&config).unwrap();
        assert!(!format!("{client:?}").contains("hunter2"));
    }
}
