//! Shared DTO types: status strings, admin and health payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status string carried by successful purchase and revenue responses.
pub const STATUS_SUCCESS: &str = "success";

/// Request body for `POST /admin`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdminRequest {
    /// Value to store for the authenticated user.
    pub value: String,
}

/// Bare status acknowledgement, e.g. `{"status":"ok"}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Status string.
    pub status: String,
}

impl StatusResponse {
    /// The `{"status":"ok"}` acknowledgement.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// `"up"` if the revenue store answered a ping, `"down"` otherwise.
    pub database: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}
