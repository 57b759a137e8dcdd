//! Admin endpoint: per-user value storage behind basic auth.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Json, Router, middleware};

use crate::api::auth::{AuthUser, require_basic_auth};
use crate::api::dto::{AdminRequest, StatusResponse};
use crate::api::extract::ValidJson;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /admin` — Store a value for the authenticated user.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if `value` is missing or empty.
#[utoipa::path(
    post,
    path = "/admin",
    tag = "Admin",
    summary = "Store a value for the caller",
    description = "Keeps `value` in process memory keyed by the basic-auth username. Values do not survive a restart.",
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Value stored", body = StatusResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Missing or wrong credentials", body = ErrorResponse),
    ),
    security(("basic_auth" = []))
)]
pub async fn store_value(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    ValidJson(req): ValidJson<AdminRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.value.is_empty() {
        return Err(ApiError::Validation("value is required".to_string()));
    }
    state.admin_store.put(&user, req.value).await;
    tracing::info!(%user, "admin value stored");
    Ok(Json(StatusResponse::ok()))
}

/// Admin routes, mounted at the root and guarded by basic auth.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", post(store_value))
        .route_layer(middleware::from_fn_with_state(state, require_basic_auth))
}
