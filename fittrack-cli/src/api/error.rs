use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message used when the server gives no usable `detail`
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    #[error("{message}")]
    Server { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build the error for a non-success response from its parsed body
    pub fn from_status(status: StatusCode, body: Option<&Value>) -> Self {
        let message = body
            .and_then(|body| body.get("detail"))
            .and_then(detail_message)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        ApiError::Server { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            ApiError::Decode(_) => None,
        }
    }
}

fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_becomes_message() {
        let body = json!({"detail": "Email already registered"});
        let error = ApiError::from_status(StatusCode::BAD_REQUEST, Some(&body));
        assert_eq!(error.to_string(), "Email already registered");
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_missing_detail_uses_fallback() {
        let error = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, Some(&json!({})));
        assert_eq!(error.to_string(), FALLBACK_MESSAGE);

        let error = ApiError::from_status(StatusCode::BAD_GATEWAY, None);
        assert_eq!(error.to_string(), FALLBACK_MESSAGE);

        let error =
            ApiError::from_status(StatusCode::BAD_REQUEST, Some(&json!({"detail": ""})));
        assert_eq!(error.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let body = json!({"detail": [{"loc": ["body", "sets"], "msg": "field required"}]});
        let error = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, Some(&body));
        assert!(error.to_string().contains("field required"));
    }
}
