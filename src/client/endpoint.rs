//! Declarative gateway endpoint table.
//!
//! Each logical operation is one table entry: HTTP verb plus resource path
//! template. A single generic dispatch routine in
//! [`GatewayClient`](crate::GatewayClient) drives all of them; the entries
//! themselves carry no behavior beyond path rendering.

use reqwest::Method;

use crate::error::{GatewayError, Result};

/// One gateway operation: verb and path template.
///
/// Path templates use a single `{id}` placeholder for the transaction
/// identifier segment.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    /// Operation name, used in traces and error messages.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Resource path template, always starting with `/`.
    pub path: &'static str,
}

impl Endpoint {
    /// Renders the resource path, substituting `{id}` if the template has one.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingParameter`] when the template needs an
    /// id and none (or an empty one) was supplied. Rejection happens here,
    /// before any request is built or signed.
    pub(crate) fn render_path(&self, id: Option<&str>) -> Result<String> {
        if !self.path.contains("{id}") {
            return Ok(self.path.to_owned());
        }
        match id {
            Some(id) if !id.is_empty() => Ok(self.path.replace("{id}", id)),
            _ => Err(GatewayError::MissingParameter(format!("id (operation '{}')", self.name))),
        }
    }
}

macro_rules! endpoint {
    ($const_name:ident, $name:literal, $method:ident, $path:literal) => {
        pub(crate) const $const_name: Endpoint =
            Endpoint { name: $name, method: Method::$method, path: $path };
    };
}

endpoint!(SEARCH_PAYMENTS, "search_payments", POST, "/payments/v1/search");
endpoint!(GET_PAYMENT, "get_payment", GET, "/payments/v1/search/{id}");
endpoint!(AUTHORIZE, "authorize", POST, "/payments/v1/authorizations");
endpoint!(FIND_AUTHORIZATIONS, "find_authorizations", GET, "/payments/v1/authorizations");
endpoint!(GET_AUTHORIZATION, "get_authorization", GET, "/payments/v1/authorizations/{id}");
endpoint!(SALE, "sale", POST, "/payments/v1/sales");
endpoint!(FIND_SALES, "find_sales", GET, "/payments/v1/sales");
endpoint!(GET_SALE, "get_sale", GET, "/payments/v1/sales/{id}");
endpoint!(CAPTURE, "capture", POST, "/payments/v1/authorizations/{id}/captures");
endpoint!(
    FIND_AUTHORIZATION_CAPTURES,
    "find_authorization_captures",
    GET,
    "/payments/v1/authorizations/{id}/captures"
);
endpoint!(GET_CAPTURE, "get_capture", GET, "/payments/v1/captures/{id}");
endpoint!(FIND_CAPTURES, "find_captures", GET, "/payments/v1/captures");
endpoint!(REFUND_CAPTURE, "refund_capture", POST, "/payments/v1/captures/{id}/refunds");
endpoint!(FIND_CAPTURE_REFUNDS, "find_capture_refunds", GET, "/payments/v1/captures/{id}/refunds");
endpoint!(REFUND_SALE, "refund_sale", POST, "/payments/v1/sales/{id}/refunds");
endpoint!(FIND_SALE_REFUNDS, "find_sale_refunds", GET, "/payments/v1/sales/{id}/refunds");
endpoint!(FIND_REFUNDS, "find_refunds", GET, "/payments/v1/refunds");
endpoint!(GET_REFUND, "get_refund", GET, "/payments/v1/refunds/{id}");
endpoint!(VOID_CAPTURE, "void_capture", POST, "/payments/v1/captures/{id}/voids");
endpoint!(VOID_REFUND, "void_refund", POST, "/payments/v1/refunds/{id}/voids");
endpoint!(VOID_SALE, "void_sale", POST, "/payments/v1/sales/{id}/voids");
endpoint!(GET_VOID, "get_void", GET, "/payments/v1/voids/{id}");
endpoint!(CREDIT, "credit", POST, "/payments/v1/credits");
endpoint!(FIND_CREDITS, "find_credits", GET, "/payments/v1/credits");
endpoint!(GET_CREDIT, "get_credit", GET, "/payments/v1/credits/{id}");
endpoint!(VOID_CREDIT, "void_credit", POST, "/payments/v1/credits/{id}/voids");

/// All endpoints, for table-level assertions.
#[cfg(test)]
pub(crate) const ALL: &[&Endpoint] = &[
    &SEARCH_PAYMENTS,
    &GET_PAYMENT,
    &AUTHORIZE,
    &FIND_AUTHORIZATIONS,
    &GET_AUTHORIZATION,
    &SALE,
    &FIND_SALES,
    &GET_SALE,
    &CAPTURE,
    &FIND_AUTHORIZATION_CAPTURES,
    &GET_CAPTURE,
    &FIND_CAPTURES,
    &REFUND_CAPTURE,
    &FIND_CAPTURE_REFUNDS,
    &REFUND_SALE,
    &FIND_SALE_REFUNDS,
    &FIND_REFUNDS,
    &GET_REFUND,
    &VOID_CAPTURE,
    &VOID_REFUND,
    &VOID_SALE,
    &GET_VOID,
    &CREDIT,
    &FIND_CREDITS,
    &GET_CREDIT,
    &VOID_CREDIT,
];
