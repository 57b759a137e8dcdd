//! Purchase events and their expansion into revenue event rows.
//!
//! A [`PurchaseEvent`] is never stored verbatim. Each product line becomes
//! one [`RevenueEventRow`] carrying the extended amount
//! (`amount × quantity`), which is computed here exactly once.

use chrono::{DateTime, Utc};

use super::Identifier;

/// Subscription term window for a product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Term {
    /// Start of the term, if known.
    pub start: Option<DateTime<Utc>>,
    /// End of the term, if known.
    pub end: Option<DateTime<Utc>>,
}

/// One line item of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    /// Subscription id, or the purchase id for one-off lines.
    pub service_id: Identifier,
    /// Product sold.
    pub product_id: Identifier,
    /// Unit price in the smallest currency denomination.
    pub amount: i32,
    /// Number of units.
    pub quantity: i64,
    /// Term window; `None` for one-off purchases.
    pub term: Option<Term>,
}

impl ProductLine {
    /// `amount × quantity`, or `None` when the product does not fit in 64
    /// bits.
    #[must_use]
    pub fn extended_amount(&self) -> Option<i64> {
        i64::from(self.amount).checked_mul(self.quantity)
    }
}

/// A purchase or subscription billing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseEvent {
    /// Unique event identifier.
    pub event_id: Identifier,
    /// When the event took effect; becomes `valid_from` on each row.
    pub event_dt: DateTime<Utc>,
    /// When the invoice was created.
    pub created: DateTime<Utc>,
    /// When the invoice was paid.
    pub paid: DateTime<Utc>,
    /// Paying customer.
    pub customer_id: Identifier,
    /// Currency code, e.g. `"USD"`.
    pub currency_code: String,
    /// Line items in input order.
    pub products: Vec<ProductLine>,
}

/// A purchase event that cannot be recorded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    /// The event has no product lines.
    #[error("products must contain at least one line")]
    NoProducts,

    /// A line has a zero unit amount.
    #[error("products[{0}].amount is required")]
    MissingAmount(usize),

    /// A line has a zero quantity.
    #[error("products[{0}].quantity is required")]
    MissingQuantity(usize),

    /// The currency code is blank.
    #[error("currency is required")]
    MissingCurrency,

    /// A line's `amount × quantity` does not fit in a signed 64-bit integer.
    #[error("products[{0}] extended amount overflows")]
    AmountOverflow(usize),
}

/// A persisted revenue event: one per product line of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueEventRow {
    /// Purchase event this row came from.
    pub event_id: Identifier,
    /// Service lineage the row belongs to.
    pub service_id: Identifier,
    /// Paying customer.
    pub customer_id: Identifier,
    /// Currency code.
    pub currency_code: String,
    /// `amount × quantity`, fixed at ingestion.
    pub extended_amount: i64,
    /// Term start, if any.
    pub term_start: Option<DateTime<Utc>>,
    /// Term end, if any.
    pub term_end: Option<DateTime<Utc>>,
    /// Equal to the purchase's `event_dt`.
    pub valid_from: DateTime<Utc>,
    /// Invoice creation time.
    pub created: DateTime<Utc>,
    /// Invoice payment time.
    pub paid: DateTime<Utc>,
}

impl PurchaseEvent {
    /// Checks the event beyond what deserialization enforces.
    ///
    /// # Errors
    ///
    /// Returns the first [`PurchaseError`] found, scanning lines in order.
    pub fn validate(&self) -> Result<(), PurchaseError> {
        if self.currency_code.trim().is_empty() {
            return Err(PurchaseError::MissingCurrency);
        }
        if self.products.is_empty() {
            return Err(PurchaseError::NoProducts);
        }
        for (idx, line) in self.products.iter().enumerate() {
            if line.amount == 0 {
                return Err(PurchaseError::MissingAmount(idx));
            }
            if line.quantity == 0 {
                return Err(PurchaseError::MissingQuantity(idx));
            }
            if line.extended_amount().is_none() {
                return Err(PurchaseError::AmountOverflow(idx));
            }
        }
        Ok(())
    }

    /// Validates the event and expands it into one row per product line,
    /// preserving input order.
    ///
    /// # Errors
    ///
    /// Returns a [`PurchaseError`] if [`PurchaseEvent::validate`] fails.
    pub fn revenue_rows(&self) -> Result<Vec<RevenueEventRow>, PurchaseError> {
        self.validate()?;
        self.products
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let extended_amount = line
                    .extended_amount()
                    .ok_or(PurchaseError::AmountOverflow(idx))?;
                let term = line.term.unwrap_or_default();
                Ok(RevenueEventRow {
                    event_id: self.event_id,
                    service_id: line.service_id,
                    customer_id: self.customer_id,
                    currency_code: self.currency_code.clone(),
                    extended_amount,
                    term_start: term.start,
                    term_end: term.end,
                    valid_from: self.event_dt,
                    created: self.created,
                    paid: self.paid,
                })
            })
            .collect()
    }
}
