//! Purchase ingestion handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{PurchaseRequest, PurchaseResponse, STATUS_SUCCESS};
use crate::api::extract::ValidJson;
use crate::app_state::AppState;
use crate::domain::PurchaseEvent;
use crate::error::{ApiError, ErrorResponse};

/// `POST /purchase/process` — Record a purchase event.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a malformed body and
/// [`ApiError::Persistence`] if the rows cannot be written.
#[utoipa::path(
    post,
    path = "/api/v1/purchase/process",
    tag = "Purchases",
    summary = "Record a purchase event",
    description = "Expands the purchase into one revenue event per product line and stores them in a single transaction. Either every line is recorded or none is.",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Purchase recorded", body = PurchaseResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Storage failure; nothing was recorded", body = ErrorResponse),
    )
)]
pub async fn process_purchase(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<PurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = PurchaseEvent::from(req);
    let event_id = state.revenue_service.process_purchase(&event).await?;

    Ok(Json(PurchaseResponse {
        status: STATUS_SUCCESS.to_string(),
        event_id,
    }))
}

/// Purchase routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/purchase/process", post(process_purchase))
}
