//! Purchase ingestion DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Identifier, ProductLine, PurchaseEvent, Term};

/// Term window of a subscription line.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TermDto {
    /// Term start (RFC 3339).
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Term end (RFC 3339).
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// One product line of a purchase.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductLineDto {
    /// Subscription id, or purchase id when there is no term.
    pub service_id: Identifier,
    /// Product sold.
    pub product_id: Identifier,
    /// Unit price in the smallest currency denomination.
    pub amount: i32,
    /// Number of units.
    pub quantity: i64,
    /// Term window; omit for one-off purchases.
    #[serde(default)]
    pub term: Option<TermDto>,
}

/// Request body for `POST /api/v1/purchase/process`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    /// Unique event identifier.
    #[serde(alias = "event_id")]
    pub id: Identifier,
    /// When the event took effect.
    pub event_dt: DateTime<Utc>,
    /// When the invoice was created.
    pub created: DateTime<Utc>,
    /// When the invoice was paid.
    pub paid: DateTime<Utc>,
    /// Paying customer.
    #[serde(alias = "customer_id")]
    pub customer: Identifier,
    /// Currency code (e.g. `"USD"`).
    #[serde(alias = "currency_code")]
    pub currency: String,
    /// Product lines, in order.
    pub products: Vec<ProductLineDto>,
}

/// Response body for a recorded purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseResponse {
    /// Always `"success"`.
    pub status: String,
    /// Echo of the recorded event id.
    pub event_id: Identifier,
}

impl From<TermDto> for Term {
    fn from(dto: TermDto) -> Self {
        Self {
            start: dto.start,
            end: dto.end,
        }
    }
}

impl From<ProductLineDto> for ProductLine {
    fn from(dto: ProductLineDto) -> Self {
        Self {
            service_id: dto.service_id,
            product_id: dto.product_id,
            amount: dto.amount,
            quantity: dto.quantity,
            term: dto.term.map(Term::from),
        }
    }
}

impl From<PurchaseRequest> for PurchaseEvent {
    fn from(req: PurchaseRequest) -> Self {
        Self {
            event_id: req.id,
            event_dt: req.event_dt,
            created: req.created,
            paid: req.paid,
            customer_id: req.customer,
            currency_code: req.currency,
            products: req.products.into_iter().map(ProductLine::from).collect(),
        }
    }
}
