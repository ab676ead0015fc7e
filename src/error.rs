//! Error types for the Veryfi SDK.
//!
//! Every operation returns [`VeryfiError`]. Nothing is retried or recovered
//! locally; the caller decides what to do with a failure.

use thiserror::Error;

/// Result type for Veryfi operations.
pub type Result<T> = std::result::Result<T, VeryfiError>;

/// Errors that can occur when using the Veryfi SDK.
#[derive(Error, Debug)]
pub enum VeryfiError {
    /// The API answered with a non-2xx status.
    #[error("API error ({status_code}): {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error detail reported by the API.
        message: String,
        /// Parsed response body, when it was JSON.
        body: Option<serde_json::Value>,
    },

    /// Transport failure (connection, DNS, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client configuration does not allow the requested operation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error classes the Veryfi API reports through HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400
    BadRequest,
    /// 401
    UnauthorizedAccessToken,
    /// 404
    NotFound,
    /// 405
    UnexpectedHttpMethod,
    /// 409
    AccessLimitReached,
    /// 500
    InternalError,
    /// Any other status.
    Other,
}

impl ApiErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            400 => Self::BadRequest,
            401 => Self::UnauthorizedAccessToken,
            404 => Self::NotFound,
            405 => Self::UnexpectedHttpMethod,
            409 => Self::AccessLimitReached,
            500 => Self::InternalError,
            _ => Self::Other,
        }
    }
}

impl VeryfiError {
    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            VeryfiError::Api { status_code: 401, .. } | VeryfiError::Api { status_code: 403, .. }
        )
    }

    /// Returns the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VeryfiError::Api { status_code, .. } => Some(*status_code),
            VeryfiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the API error class, for errors that came back from the API.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            VeryfiError::Api { status_code, .. } => Some(ApiErrorKind::from_status(*status_code)),
            _ => None,
        }
    }

    /// Returns true if the transport gave up waiting for the API.
    pub fn is_timeout(&self) -> bool {
        matches!(self, VeryfiError::Http(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status_code: u16, message: &str) -> VeryfiError {
        VeryfiError::Api {
            status_code,
            message: message.to_string(),
            body: None,
        }
    }

    #[test]
    fn test_error_display() {
        let err = api_error(404, "Document not found");
        assert_eq!(err.to_string(), "API error (404): Document not found");
    }

    #[test]
    fn test_display_keeps_status_and_detail() {
        let err = api_error(401, "Unauthorized");
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Unauthorized"));
    }

    #[test]
    fn test_is_auth_error() {
        assert!(api_error(401, "Unauthorized").is_auth_error());
        assert!(api_error(403, "Forbidden").is_auth_error());
        assert!(!api_error(404, "Not found").is_auth_error());
        assert!(!VeryfiError::Config("w2".into()).is_auth_error());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(api_error(500, "boom").status_code(), Some(500));
        assert_eq!(VeryfiError::Config("bad".into()).status_code(), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(api_error(400, "x").kind(), Some(ApiErrorKind::BadRequest));
        assert_eq!(
            api_error(401, "x").kind(),
            Some(ApiErrorKind::UnauthorizedAccessToken)
        );
        assert_eq!(
            api_error(409, "x").kind(),
            Some(ApiErrorKind::AccessLimitReached)
        );
        assert_eq!(api_error(418, "x").kind(), Some(ApiErrorKind::Other));
        assert_eq!(VeryfiError::InvalidRequest("x".into()).kind(), None);
    }
}
