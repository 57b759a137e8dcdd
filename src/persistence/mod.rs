//! Persistence layer: revenue event storage and revenue queries.
//!
//! [`RevenueStore`] is the seam between the service and the database.
//! [`postgres::PostgresRevenueStore`] is the production implementation
//! over `sqlx::PgPool`; [`memory::MemoryRevenueStore`] keeps rows in
//! process memory and is used by tests and local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{DateRange, RevenueEventRow, RevenueSummary};
use crate::error::ApiError;

pub use memory::MemoryRevenueStore;
pub use postgres::PostgresRevenueStore;

/// Storage for revenue events and the revenue queries over them.
#[async_trait]
pub trait RevenueStore: Send + Sync + std::fmt::Debug {
    /// Records all rows of one purchase atomically.
    ///
    /// Either every row is durably stored or none is. Rows are written in
    /// the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] with the storage message if any
    /// row cannot be written, including a duplicate `(event_id, service_id)`.
    async fn record_purchase(&self, rows: &[RevenueEventRow]) -> Result<(), ApiError>;

    /// Summarizes revenue recognized within `range`, grouped by currency.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Query`] if the query fails or its rows cannot
    /// be decoded.
    async fn summarize_revenue(&self, range: DateRange) -> Result<Vec<RevenueSummary>, ApiError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Query`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), ApiError>;
}
