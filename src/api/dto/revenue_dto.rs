//! Revenue query DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RevenueDate, RevenueSummary};

/// Request body for `POST /api/v1/revenue/by_date` and `/by_month`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RevenueQueryRequest {
    /// Day to report on, as `YYYY-MM-DD`.
    pub revenue_date: RevenueDate,
    /// Point-of-view timestamp (RFC 3339). Accepted but not yet applied.
    #[serde(default)]
    pub pov_timestamp: Option<DateTime<Utc>>,
}

/// Response body for revenue queries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RevenueResponse {
    /// Always `"success"`.
    pub status: String,
    /// One entry per currency; empty when nothing was recognized.
    pub revenue_summary: Vec<RevenueSummary>,
}
