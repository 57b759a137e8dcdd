//! Revenue service: purchase ingestion and revenue queries.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{DateRange, Identifier, PurchaseEvent, RevenueDate, RevenueSummary};
use crate::error::ApiError;
use crate::persistence::RevenueStore;

/// Orchestration layer for ingestion and revenue queries.
///
/// Stateless coordinator over a shared [`RevenueStore`]. It never retries:
/// every storage failure is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct RevenueService {
    store: Arc<dyn RevenueStore>,
}

impl RevenueService {
    /// Creates a new `RevenueService` over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RevenueStore>) -> Self {
        Self { store }
    }

    /// Records a purchase: one revenue event row per product line, all in
    /// one atomic write. Returns the event id on success.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the event fails validation (no
    /// rows are written), or [`ApiError::Persistence`] if the write fails
    /// (no rows are kept).
    pub async fn process_purchase(&self, event: &PurchaseEvent) -> Result<Identifier, ApiError> {
        let rows = event.revenue_rows().inspect_err(|e| {
            tracing::warn!(event_id = %event.event_id, error = %e, "purchase rejected");
        })?;

        for (line, row) in event.products.iter().zip(&rows) {
            tracing::debug!(
                event_id = %event.event_id,
                service_id = %line.service_id,
                product_id = %line.product_id,
                extended_amount = row.extended_amount,
                "expanding product line"
            );
        }

        self.store.record_purchase(&rows).await.inspect_err(|e| {
            tracing::error!(event_id = %event.event_id, error = %e, "purchase not recorded");
        })?;

        tracing::info!(
            event_id = %event.event_id,
            rows = rows.len(),
            currency = %event.currency_code,
            "purchase recorded"
        );
        Ok(event.event_id)
    }

    /// Revenue recognized on a single day.
    ///
    /// `pov_timestamp` is accepted and logged but does not change the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Query`] if the store query fails.
    pub async fn revenue_by_date(
        &self,
        revenue_date: RevenueDate,
        pov_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<RevenueSummary>, ApiError> {
        self.summarize("date", revenue_date, revenue_date.day_range(), pov_timestamp)
            .await
    }

    /// Revenue recognized over the calendar month containing `revenue_date`.
    ///
    /// `pov_timestamp` is accepted and logged but does not change the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Query`] if the store query fails.
    pub async fn revenue_by_month(
        &self,
        revenue_date: RevenueDate,
        pov_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<RevenueSummary>, ApiError> {
        self.summarize("month", revenue_date, revenue_date.month_range(), pov_timestamp)
            .await
    }

    /// Returns `true` if the store answers a ping.
    pub async fn store_reachable(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    async fn summarize(
        &self,
        granularity: &'static str,
        revenue_date: RevenueDate,
        range: DateRange,
        pov_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<RevenueSummary>, ApiError> {
        match pov_timestamp {
            Some(pov) => tracing::info!(
                granularity,
                %revenue_date,
                pov_timestamp = %pov.to_rfc3339(),
                %range,
                "revenue query"
            ),
            None => tracing::info!(granularity, %revenue_date, %range, "revenue query"),
        }

        let summary = self.store.summarize_revenue(range).await.inspect_err(|e| {
            tracing::error!(granularity, %revenue_date, error = %e, "revenue query failed");
        })?;

        tracing::debug!(granularity, currencies = summary.len(), "revenue query complete");
        Ok(summary)
    }
}
