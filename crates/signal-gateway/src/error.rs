//! Gateway error responses.
//!
//! Every per-request failure maps to one HTTP status plus a uniform JSON
//! body shape (`{"success": false, "error": "..."}`). Authentication
//! failures deliberately carry no detail about which check failed.

use crate::config::ConfigError;
use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use signal_moderation::ModerationError;

/// Gateway lifecycle errors (startup and serving, not per-request).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Binding or serving failed.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// A client-facing API error: status code, message, and optional extra
/// headers.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status to respond with.
    pub status: StatusCode,
    /// Error message placed in the response body.
    pub message: String,
    /// Seconds the client should wait before retrying (rate limiting only).
    pub retry_after: Option<u64>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retry_after: None,
        }
    }

    /// 400 - the submission failed validation.
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, reason)
    }

    /// 400 - a moderation action arrived without an id.
    pub fn missing_id() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "id is required")
    }

    /// 401 - uniform authentication failure, regardless of cause.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "authentication required")
    }

    /// 404 - no pending signal carries the requested id.
    pub fn not_found(id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("no pending signal with id {id}"))
    }

    /// 429 - submission rate limit exceeded.
    pub fn rate_limited(retry_after_seconds: u64) -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "rate limit exceeded".into(),
            retry_after: Some(retry_after_seconds),
        }
    }

    /// 500 - a collection write failed; nothing durable happened.
    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<ModerationError> for ApiError {
    fn from(err: ModerationError) -> Self {
        match err {
            ModerationError::Validation(reason) => ApiError::invalid_payload(reason),
            ModerationError::NotFound(id) => ApiError::not_found(&id),
            ModerationError::Persistence(e) => ApiError::persistence(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.message,
        });

        let mut response = Response::new(Body::from(
            serde_json::to_vec(&body).unwrap_or_default(),
        ));
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(secs) = self.retry_after {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}
