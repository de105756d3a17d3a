//! Response classification.
//!
//! The gateway answers with JSON for both successes and rejections, but the
//! client never insists on it: a body is JSON-decoded only when the content
//! type says so and decoding succeeds, and falls back to the raw bytes
//! otherwise. A parse failure on an otherwise successful response never
//! fails the call.

use std::borrow::Cow;

use serde_json::Value;

/// Outcome of a successful (2xx) gateway operation.
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Response body, decoded on a best-effort basis.
    pub body: ResponseBody,
}

/// A response body as received from the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body decoded from a JSON content type.
    Json(Value),
    /// Body passed through raw: non-JSON content type, or JSON that failed
    /// to decode.
    Raw(Vec<u8>),
}

impl ResponseBody {
    /// Classifies a body from its content type and bytes.
    pub(crate) fn from_parts(content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        if content_type.is_some_and(is_json_content_type)
            && let Ok(value) = serde_json::from_slice(&bytes)
        {
            return Self::Json(value);
        }
        Self::Raw(bytes)
    }

    /// The decoded JSON value, if the body was JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The body as text: compact JSON for decoded bodies, lossy UTF-8 for
    /// raw ones.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Json(value) => Cow::Owned(value.to_string()),
            Self::Raw(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    /// True when nothing was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Raw(bytes) if bytes.is_empty())
    }
}

/// Whether a content type indicates a JSON body.
///
/// Accepts `application/json` and structured syntaxes such as
/// `application/problem+json`, with or without parameters.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    let Some(subtype) = essence.strip_prefix("application/") else {
        return false;
    };
    subtype == "json" || subtype.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("application/jsonp"));
        assert!(!is_json_content_type("text/json"));
    }

    #[test]
    fn test_decodes_json_body() {
        let body = ResponseBody::from_parts(
            Some("application/json"),
            br#"{"id":"txn-1","status":"AUTHORIZED"}"#.to_vec(),
        );
        assert_eq!(
            body.as_json(),
            Some(&json!({"id": "txn-1", "status": "AUTHORIZED"}))
        );
    }

    #[test]
    fn test_malformed_json_falls_back_to_raw() {
        let bytes = b"{not json".to_vec();
        let body = ResponseBody::from_parts(Some("application/json"), bytes.clone());
        assert_eq!(body, ResponseBody::Raw(bytes));
        assert_eq!(body.text(), "{not json");
    }

    #[test]
    fn test_non_json_content_type_stays_raw() {
        let body = ResponseBody::from_parts(Some("text/html"), b"<html/>".to_vec());
        assert!(body.as_json().is_none());
    }

    #[test]
    fn test_missing_content_type_stays_raw() {
        let body = ResponseBody::from_parts(None, b"123".to_vec());
        assert_eq!(body, ResponseBody::Raw(b"123".to_vec()));
    }

    #[test]
    fn test_empty_body() {
        let body = ResponseBody::from_parts(None, Vec::new());
        assert!(body.is_empty());
        assert_eq!(body.text(), "");
    }
}
