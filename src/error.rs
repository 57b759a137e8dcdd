//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Every variant
//! renders the same JSON envelope; only the HTTP status code tells a bad
//! request apart from an infrastructure failure.

use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PurchaseError;

/// Realm advertised in the basic-auth challenge.
pub const BASIC_AUTH_REALM: &str = "Basic realm=\"Authorization Required\"";

/// Status string carried by every error envelope.
pub const STATUS_ERROR: &str = "error";

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "status": "error", "error": "Invalid request body: missing field `currency`" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant        | HTTP Status                |
/// |----------------|----------------------------|
/// | `Validation`   | 400 Bad Request            |
/// | `Unauthorized` | 401 Unauthorized           |
/// | `Persistence`  | 500 Internal Server Error  |
/// | `Query`        | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing request fields. Raised before any side effect.
    #[error("Invalid request body: {0}")]
    Validation(String),

    /// A transactional write failed and was rolled back.
    #[error("{0}")]
    Persistence(String),

    /// A read failed or its result could not be decoded.
    #[error("{0}")]
    Query(String),

    /// Missing or wrong basic-auth credentials.
    #[error("authorization required")]
    Unauthorized,
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Persistence(_) | Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PurchaseError> for ApiError {
    fn from(err: PurchaseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status: STATUS_ERROR.to_string(),
            error: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_AUTH_REALM),
            );
        }
        response
    }
}
