//! Revenue query handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{RevenueQueryRequest, RevenueResponse, STATUS_SUCCESS};
use crate::api::extract::ValidJson;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /revenue/by_date` — Revenue recognized on one day.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a malformed body and
/// [`ApiError::Query`] if the revenue query fails.
#[utoipa::path(
    post,
    path = "/api/v1/revenue/by_date",
    tag = "Revenue",
    summary = "Revenue by date",
    description = "Sums recognized revenue for `revenue_date`, grouped by currency. `pov_timestamp` is accepted but not yet applied.",
    request_body = RevenueQueryRequest,
    responses(
        (status = 200, description = "Per-currency summary (possibly empty)", body = RevenueResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Revenue query failed", body = ErrorResponse),
    )
)]
pub async fn revenue_by_date(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RevenueQueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let revenue_summary = state
        .revenue_service
        .revenue_by_date(req.revenue_date, req.pov_timestamp)
        .await?;

    Ok(Json(RevenueResponse {
        status: STATUS_SUCCESS.to_string(),
        revenue_summary,
    }))
}

/// `POST /revenue/by_month` — Revenue recognized over a calendar month.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a malformed body and
/// [`ApiError::Query`] if the revenue query fails.
#[utoipa::path(
    post,
    path = "/api/v1/revenue/by_month",
    tag = "Revenue",
    summary = "Revenue by month",
    description = "Sums recognized revenue over the calendar month containing `revenue_date`, grouped by currency. `pov_timestamp` is accepted but not yet applied.",
    request_body = RevenueQueryRequest,
    responses(
        (status = 200, description = "Per-currency summary (possibly empty)", body = RevenueResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Revenue query failed", body = ErrorResponse),
    )
)]
pub async fn revenue_by_month(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RevenueQueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let revenue_summary = state
        .revenue_service
        .revenue_by_month(req.revenue_date, req.pov_timestamp)
        .await?;

    Ok(Json(RevenueResponse {
        status: STATUS_SUCCESS.to_string(),
        revenue_summary,
    }))
}

/// Revenue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/revenue/by_date", post(revenue_by_date))
        .route("/revenue/by_month", post(revenue_by_month))
}
