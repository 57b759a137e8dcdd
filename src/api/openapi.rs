//! OpenAPI document for the REST API.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers;

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "revenue-tracker",
        description = "Records purchase events and reports recognized revenue."
    ),
    paths(
        handlers::purchase::process_purchase,
        handlers::revenue::revenue_by_date,
        handlers::revenue::revenue_by_month,
        handlers::admin::store_value,
        handlers::system::health_handler,
    ),
    modifiers(&BasicAuthScheme),
    tags(
        (name = "Purchases", description = "Purchase event ingestion"),
        (name = "Revenue", description = "Recognized revenue queries"),
        (name = "Admin", description = "Authenticated admin operations"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Registers the `basic_auth` security scheme used by `/admin`.
#[derive(Debug)]
struct BasicAuthScheme;

impl Modify for BasicAuthScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}
