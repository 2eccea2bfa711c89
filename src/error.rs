//! Error types for Lunch Money API operations.

use thiserror::Error;

/// Errors that can occur during Lunch Money API operations.
///
/// Non-success responses are categorized by HTTP status so callers can
/// decide whether to fix the request, re-authenticate, or back off and retry.
/// The client itself never retries.
#[derive(Debug, Error)]
pub enum LunchMoneyError {
    /// Configuration is missing or incomplete.
    #[error("Lunch Money configuration required: {0}")]
    ConfigMissing(String),

    /// The request was rejected as invalid (HTTP 400), or failed a
    /// client-side check before being sent.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The access token is missing or was rejected (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The addressed entity does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Rate limited (HTTP 429).
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The server failed to handle the request (HTTP 5xx).
    #[error("Lunch Money server error ({status_code}): {message}")]
    Server { status_code: u16, message: String },

    /// Any other non-success response.
    #[error("Lunch Money API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// The response body did not match the expected model.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl LunchMoneyError {
    /// Build a client-side validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The HTTP status this error was derived from, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Validation { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status_code, .. } | Self::Api { status_code, .. } => {
                Some(*status_code)
            }
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether backing off and retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }
}

/// A response or payload that could not be turned into a typed model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required field was absent.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A field was present but held the wrong type or an invalid value.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The payload was not valid JSON.
    #[error("malformed JSON: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => {
                let message = err.to_string();
                match missing_field_name(&message) {
                    Some(field) => DecodeError::MissingField {
                        field: field.to_string(),
                    },
                    None => DecodeError::TypeMismatch(message),
                }
            }
            Category::Syntax | Category::Eof | Category::Io => {
                DecodeError::Malformed(err.to_string())
            }
        }
    }
}

/// Pull the field name out of serde's "missing field `x`" message.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

/// Result type alias for Lunch Money operations.
pub type Result<T> = core::result::Result<T, LunchMoneyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Sample {
        id: u64,
        payee: String,
    }

    #[test]
    fn test_missing_field_is_classified() {
        let err = serde_json::from_str::<Sample>(r#"{"id": 1}"#).unwrap_err();
        assert_eq!(
            DecodeError::from(err),
            DecodeError::MissingField {
                field: "payee".to_string()
            }
        );
    }

    #[test]
    fn test_type_mismatch_is_classified() {
        let err = serde_json::from_str::<Sample>(r#"{"id": "one", "payee": "x"}"#).unwrap_err();
        assert!(matches!(DecodeError::from(err), DecodeError::TypeMismatch(_)));
    }

    #[test]
    fn test_malformed_json_is_classified() {
        let err = serde_json::from_str::<Sample>(r#"{"id": 1,"#).unwrap_err();
        assert!(matches!(DecodeError::from(err), DecodeError::Malformed(_)));
    }

    #[test]
    fn test_retryable_categories() {
        assert!(LunchMoneyError::RateLimited {
            retry_after_secs: Some(3)
        }
        .is_retryable());
        assert!(LunchMoneyError::Server {
            status_code: 500,
            message: "boom".to_string()
        }
        .is_retryable());
        assert!(!LunchMoneyError::validation("bad").is_retryable());
        assert!(!LunchMoneyError::NotFound {
            message: "gone".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(LunchMoneyError::validation("x").status_code(), Some(400));
        assert_eq!(
            LunchMoneyError::Unauthorized {
                message: "x".to_string()
            }
            .status_code(),
            Some(401)
        );
        assert_eq!(
            LunchMoneyError::ConfigMissing("x".to_string()).status_code(),
            None
        );
    }
}
