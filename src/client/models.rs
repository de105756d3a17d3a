//! Typed request bodies for gateway operations.
//!
//! The gateway accepts camel-case JSON documents; these structs pin down the
//! fields the API contract names while staying open to gateway-specific
//! extensions through a flattened `extra` map. Monetary amounts are
//! [`Decimal`] values, serialized in the gateway's string form (`"100.00"`).
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use xpay_client::client::{AuthorizationRequest, PaymentCard};
//!
//! let request = AuthorizationRequest {
//!     amount: Decimal::new(10000, 2), // 100.00
//!     currency: "USD".to_owned(),
//!     reference_id: Some("order-123".to_owned()),
//!     payment: Some(PaymentCard {
//!         card_number: "4111111111111111".to_owned(),
//!         card_expiration_month: "10".to_owned(),
//!         card_expiration_year: "2028".to_owned(),
//!         cvv: None,
//!     }),
//!     extra: Default::default(),
//! };
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Card details for an authorization, sale, or credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    /// Primary account number.
    pub card_number: String,
    /// Two-digit expiration month.
    pub card_expiration_month: String,
    /// Four-digit expiration year.
    pub card_expiration_year: String,
    /// Card verification value, when the gateway profile requires it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}

/// Body of an authorization request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    /// Amount to authorize.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Caller-assigned reference for reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Payment instrument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentCard>,
    /// Gateway-specific fields not enumerated above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a sale (authorization plus immediate capture) request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Amount to charge.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Caller-assigned reference for reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Payment instrument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentCard>,
    /// Gateway-specific fields not enumerated above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a capture request against an existing authorization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    /// Amount to capture; the full authorized amount when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Gateway-specific fields not enumerated above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a refund request against a capture or sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    /// Amount to refund; the full captured amount when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Free-text refund reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Gateway-specific fields not enumerated above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a void request.
///
/// Usually empty on the wire (`{}`); the gateway identifies the transaction
/// to void from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoidRequest {
    /// Gateway-specific fields, if the profile defines any.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a standalone credit request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    /// Amount to credit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Caller-assigned reference for reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Payment instrument to credit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentCard>,
    /// Gateway-specific fields not enumerated above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a transaction search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Match against the caller-assigned reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Inclusive lower bound on transaction date (gateway date format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Inclusive upper bound on transaction date (gateway date format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Gateway-specific search criteria not enumerated above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_authorization_wire_format() {
        let request = AuthorizationRequest {
            amount: Decimal::new(10000, 2),
            currency: "USD".to_owned(),
            reference_id: Some("123".to_owned()),
            payment: Some(PaymentCard {
                card_number: "4111111111111111".to_owned(),
                card_expiration_month: "10".to_owned(),
                card_expiration_year: "2028".to_owned(),
                cvv: None,
            }),
            extra: Map::new(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "amount": "100.00",
                "currency": "USD",
                "referenceId": "123",
                "payment": {
                    "cardNumber": "4111111111111111",
                    "cardExpirationMonth": "10",
                    "cardExpirationYear": "2028",
                },
            })
        );
    }

    #[test]
    fn test_empty_void_serializes_as_empty_object() {
        let json = serde_json::to_string(&VoidRequest::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_capture_request_omits_absent_amount() {
        let json = serde_json::to_string(&CaptureRequest::default()).unwrap();
        assert_eq!(json, "{}");

        let with_amount =
            CaptureRequest { amount: Some(Decimal::new(5000, 2)), ..Default::default() };
        assert_eq!(serde_json::to_string(&with_amount).unwrap(), r#"{"amount":"50.00"}"#);
    }

    #[test]
    fn test_extra_fields_flatten() {
        let mut extra = Map::new();
        extra.insert("merchantDefined1".to_owned(), json!("promo"));
        let request = RefundRequest { extra, ..Default::default() };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"merchantDefined1": "promo"}));
    }

    #[test]
    fn test_search_request_roundtrip() {
        let request = SearchRequest {
            reference_id: Some("order-9".to_owned()),
            from_date: Some("2026-01-01".to_owned()),
            to_date: None,
            extra: Map::new(),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: SearchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
