use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The main error message, shown to the user verbatim when present.
    #[serde(default)]
    pub message: String,
    /// Optional additional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// True when the backend actually supplied a message body.
    #[must_use]
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_new() {
        let error = ErrorResponse::new("Test error");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.details, None);
        assert!(error.has_message());
    }

    #[test]
    fn test_error_response_display() {
        assert_eq!(ErrorResponse::new("Simple error").to_string(), "Simple error");
        let detailed = ErrorResponse {
            message: "Main error".to_string(),
            details: Some("Additional info".to_string()),
        };
        assert_eq!(detailed.to_string(), "Main error: Additional info");
    }

    #[test]
    fn test_error_response_deserialization() {
        let error: ErrorResponse =
            serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(error.message, "Invalid credentials");
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_error_response_tolerates_empty_body() {
        let error: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert!(!error.has_message());
    }
}
