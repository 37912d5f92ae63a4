//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the backend rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status == http::StatusCode::UNAUTHORIZED.as_u16()
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Human-readable error text.
    ///
    /// Uses the backend's `{"message": ...}` (or `error`) field when the body
    /// is JSON, the raw text otherwise, and the status reason when empty.
    pub fn message(&self) -> String {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(&self.body) {
            for key in ["message", "error"] {
                if let Some(serde_json::Value::String(msg)) = map.get(key) {
                    return msg.clone();
                }
            }
        }

        match self.text() {
            Ok(text) if !text.trim().is_empty() => text,
            _ => http::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string(),
        }
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Http {
                status: self.status,
                message: self.message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(401, b"").is_success());
    }

    #[test]
    fn test_response_is_unauthorized() {
        assert!(make_response(401, b"").is_unauthorized());
        assert!(!make_response(403, b"").is_unauthorized());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_json() {
        let resp = make_response(200, br#"{"token": "abc"}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["token"], "abc");

        let resp = make_response(200, b"not json");
        assert!(matches!(
            resp.json::<serde_json::Value>(),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_message_prefers_backend_field() {
        assert_eq!(
            make_response(400, br#"{"success": false, "message": "Invalid product"}"#).message(),
            "Invalid product"
        );
        assert_eq!(make_response(500, br#"{"error": "boom"}"#).message(), "boom");
        assert_eq!(make_response(502, b"Bad gateway upstream").message(), "Bad gateway upstream");
        assert_eq!(make_response(404, b"").message(), "Not Found");
    }

    #[test]
    fn test_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());

        match make_response(404, br#"{"message": "Product not found"}"#).error_for_status() {
            Err(FetchError::Http { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Product not found");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
