//! Custom error types for the Mini App client
//!
//! This module defines the error taxonomy shared by every API-calling
//! component: transport failures, structured 4xx validation failures,
//! the special 401 "needs re-auth" case, and 404 on optional lookups.

use serde_json::Value;
use thiserror::Error;

/// Error type for calls against the backend REST API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or transport failure before an HTTP status was received
    #[error("Network error: {0}")]
    Transport(String),

    /// HTTP 401; treated as "needs re-authentication", not a terminal error
    #[error("Unauthorized")]
    Unauthorized,

    /// HTTP 404; optional lookups map this to `Ok(None)` instead
    #[error("Not found")]
    NotFound,

    /// HTTP 4xx validation failure with the backend's `detail` payload
    #[error("Validation error ({status}): {detail}")]
    Validation { status: u16, detail: String },

    /// Any other non-success HTTP status
    #[error("Unexpected status: {status}")]
    Status { status: u16 },

    /// The response body could not be decoded into the expected shape
    #[error("Response decode error: {0}")]
    Decode(String),

    /// Authentication flow failure surfaced through an API call
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Classify a non-success HTTP response.
    ///
    /// The backend reports validation failures through a `detail` field that
    /// is either a plain string or a list of `{msg}` objects; the latter is
    /// joined with `"; "`.
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            400..=499 => ApiError::Validation {
                status,
                detail: parse_detail(body),
            },
            _ => ApiError::Status { status },
        }
    }
}

/// Extract a human-readable message from an error response body.
fn parse_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match value.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}

/// Error type for the Telegram login/re-authentication flow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The Telegram bridge did not become ready in time
    #[error("Telegram bridge did not become ready within {0} seconds")]
    BridgeTimeout(u64),

    /// The bridge is ready but supplied no init-data
    #[error("No Telegram init data available")]
    MissingInitData,

    /// The credential exchange with the backend failed
    #[error("Credential exchange failed: {0}")]
    Exchange(String),
}

/// Error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
}

/// Type alias for Result with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let err = ApiError::from_response(400, r#"{"detail": "article already taken"}"#);
        match err {
            ApiError::Validation { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "article already taken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn list_detail_is_joined_with_semicolons() {
        let body = r#"{"detail": [{"msg": "price must be positive"}, {"msg": "name is required"}]}"#;
        let err = ApiError::from_response(422, body);
        match err {
            ApiError::Validation { detail, .. } => {
                assert_eq!(detail, "price must be positive; name is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_401_maps_to_unauthorized() {
        assert!(matches!(
            ApiError::from_response(401, ""),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn status_404_maps_to_not_found() {
        assert!(matches!(
            ApiError::from_response(404, "{}"),
            ApiError::NotFound
        ));
    }

    #[test]
    fn server_errors_keep_their_status() {
        match ApiError::from_response(503, "") {
            ApiError::Status { status } => assert_eq!(status, 503),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_falls_back_to_raw_text() {
        match ApiError::from_response(400, "bad gateway page") {
            ApiError::Validation { detail, .. } => assert_eq!(detail, "bad gateway page"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
