//! HTTP client error types.

use priceflow_auth::AuthError;
use priceflow_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// The credential store failed.
    #[error("Session error: {0}")]
    Session(#[from] AuthError),
}

impl FetchError {
    /// Check if the backend rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Http { status, .. } if *status == http::StatusCode::UNAUTHORIZED.as_u16())
    }

    /// HTTP status, for error responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        if e.is_unauthorized() {
            CommerceError::AuthenticationRequired(e.to_string())
        } else {
            match e {
                FetchError::Parse(msg) | FetchError::Json(msg) => CommerceError::Serialization(msg),
                other => CommerceError::Store(other.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_only_for_401() {
        let unauthorized = FetchError::Http {
            status: 401,
            message: "jwt expired".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert_eq!(unauthorized.status(), Some(401));

        let forbidden = FetchError::Http {
            status: 403,
            message: String::new(),
        };
        assert!(!forbidden.is_unauthorized());
        assert!(!FetchError::Request("refused".to_string()).is_unauthorized());
    }

    #[test]
    fn test_into_commerce_error() {
        let err: CommerceError = FetchError::Http {
            status: 401,
            message: "jwt expired".to_string(),
        }
        .into();
        assert!(err.is_auth_required());

        let err: CommerceError = FetchError::Parse("bad".to_string()).into();
        assert!(matches!(err, CommerceError::Serialization(_)));

        let err: CommerceError = FetchError::Http {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, CommerceError::Store(msg) if msg.contains("500")));
    }
}
