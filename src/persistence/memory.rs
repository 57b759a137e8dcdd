//! In-memory revenue store.
//!
//! Rows live in a `Vec` behind a [`tokio::sync::RwLock`]. The unique key
//! `(event_id, service_id)` is checked for the whole purchase before any
//! row is appended, so a rejected purchase leaves the store untouched.
//! Revenue allocation is supplied by the caller as an [`Allocator`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::RevenueStore;
use crate::domain::{
    DateRange, Identifier, RecognizedRevenue, RevenueEventRow, RevenueSummary, summarize,
};
use crate::error::ApiError;

/// Revenue allocation function: given an event, the start of the next
/// event of the same service (if any) and the queried range, returns the
/// amount recognized in the range, or `None` if the event contributes
/// nothing.
pub type Allocator =
    dyn Fn(&RevenueEventRow, Option<DateTime<Utc>>, DateRange) -> Option<f64> + Send + Sync;

/// Process-memory [`RevenueStore`].
pub struct MemoryRevenueStore {
    rows: RwLock<Vec<RevenueEventRow>>,
    allocator: Arc<Allocator>,
}

impl MemoryRevenueStore {
    /// Creates an empty store using `allocator` for revenue queries.
    pub fn new<F>(allocator: F) -> Self
    where
        F: Fn(&RevenueEventRow, Option<DateTime<Utc>>, DateRange) -> Option<f64>
            + Send
            + Sync
            + 'static,
    {
        Self {
            rows: RwLock::new(Vec::new()),
            allocator: Arc::new(allocator),
        }
    }

    /// Returns a snapshot of all stored rows in insertion order.
    pub async fn rows(&self) -> Vec<RevenueEventRow> {
        self.rows.read().await.clone()
    }

    /// End of `row`'s validity: the `valid_from` of the earliest later row
    /// in the same service lineage, or `None` while `row` is current.
    fn valid_to(rows: &[RevenueEventRow], row: &RevenueEventRow) -> Option<DateTime<Utc>> {
        rows.iter()
            .filter(|other| other.service_id == row.service_id && other.valid_from > row.valid_from)
            .map(|other| other.valid_from)
            .min()
    }

    /// Start of the successor of `row`: the same-service row whose
    /// `valid_from` equals `row`'s `valid_to`, as the SQL store joins them.
    fn next_event_start(rows: &[RevenueEventRow], row: &RevenueEventRow) -> Option<DateTime<Utc>> {
        let valid_to = Self::valid_to(rows, row)?;
        rows.iter()
            .find(|other| other.service_id == row.service_id && other.valid_from == valid_to)
            .map(|next| next.term_start.unwrap_or(next.valid_from))
    }
}

impl fmt::Debug for MemoryRevenueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRevenueStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl RevenueStore for MemoryRevenueStore {
    async fn record_purchase(&self, rows: &[RevenueEventRow]) -> Result<(), ApiError> {
        let mut stored = self.rows.write().await;
        let mut keys: HashSet<(Identifier, Identifier)> = stored
            .iter()
            .map(|row| (row.event_id, row.service_id))
            .collect();

        for row in rows {
            if !keys.insert((row.event_id, row.service_id)) {
                return Err(ApiError::Persistence(format!(
                    "Unable to execute transaction: duplicate key (event_id, service_id)=({}, {})",
                    row.event_id, row.service_id
                )));
            }
        }

        stored.extend_from_slice(rows);
        Ok(())
    }

    async fn summarize_revenue(&self, range: DateRange) -> Result<Vec<RevenueSummary>, ApiError> {
        let stored = self.rows.read().await;
        let allocations = stored.iter().filter_map(|row| {
            let next_start = Self::next_event_start(&stored, row);
            (self.allocator)(row, next_start, range).map(|recognized_amount| RecognizedRevenue {
                currency_code: row.currency_code.clone(),
                service_id: row.service_id,
                recognized_amount,
            })
        });
        Ok(summarize(allocations))
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn id(n: u128) -> Identifier {
        Identifier::from_uuid(uuid::Uuid::from_u128(n))
    }

    fn ts(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("valid timestamp"))
    }

    fn day(month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, d).unwrap_or_else(|| panic!("valid date"))
    }

    fn row(
        event: u128,
        service: u128,
        currency: &str,
        amount: i64,
        from: DateTime<Utc>,
    ) -> RevenueEventRow {
        RevenueEventRow {
            event_id: id(event),
            service_id: id(service),
            customer_id: id(99),
            currency_code: currency.to_string(),
            extended_amount: amount,
            term_start: None,
            term_end: None,
            valid_from: from,
            created: from,
            paid: from,
        }
    }

    /// Recognizes the full amount on the day the event becomes valid.
    #[allow(clippy::cast_precision_loss)]
    fn on_valid_day(row: &RevenueEventRow, _: Option<DateTime<Utc>>, range: DateRange) -> Option<f64> {
        range
            .contains(row.valid_from.date_naive())
            .then_some(row.extended_amount as f64)
    }

    #[tokio::test]
    async fn records_all_rows_in_order() {
        let store = MemoryRevenueStore::new(on_valid_day);
        let rows = vec![row(1, 10, "USD", 100, ts(4, 1)), row(1, 11, "USD", 200, ts(4, 1))];
        assert!(store.record_purchase(&rows).await.is_ok());
        assert_eq!(store.rows().await, rows);
    }

    #[tokio::test]
    async fn duplicate_key_rejects_whole_purchase() {
        let store = MemoryRevenueStore::new(on_valid_day);
        let rows = vec![row(1, 10, "USD", 100, ts(4, 1)), row(1, 10, "USD", 200, ts(4, 1))];
        let result = store.record_purchase(&rows).await;
        assert!(matches!(result, Err(ApiError::Persistence(_))));
        assert!(store.rows().await.is_empty());
    }

    #[tokio::test]
    async fn resubmitting_an_event_fails() {
        let store = MemoryRevenueStore::new(on_valid_day);
        let rows = vec![row(1, 10, "USD", 100, ts(4, 1))];
        assert!(store.record_purchase(&rows).await.is_ok());
        assert!(store.record_purchase(&rows).await.is_err());
        assert_eq!(store.rows().await.len(), 1);
    }

    #[tokio::test]
    async fn summarizes_allocations_by_currency() {
        let store = MemoryRevenueStore::new(on_valid_day);
        let rows = vec![
            row(1, 10, "USD", 100, ts(4, 1)),
            row(1, 11, "USD", 50, ts(4, 1)),
            row(2, 12, "EUR", 70, ts(4, 1)),
            row(3, 13, "USD", 999, ts(4, 2)),
        ];
        assert!(store.record_purchase(&rows).await.is_ok());

        let Ok(summary) = store
            .summarize_revenue(DateRange {
                start: day(4, 1),
                end: day(4, 1),
            })
            .await
        else {
            panic!("summary failed");
        };
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].currency_code, "EUR");
        assert_eq!(summary[1].currency_code, "USD");
        assert_eq!(summary[1].service_subs, 2);
        assert!((summary[1].recognized_amount - 150.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn passes_next_event_start_to_allocator() {
        let store = MemoryRevenueStore::new(|row, next, _| {
            (row.event_id == id(1)).then(|| if next == Some(ts(5, 1)) { 1.0 } else { -1.0 })
        });
        let mut renewal = row(2, 10, "USD", 100, ts(4, 20));
        renewal.term_start = Some(ts(5, 1));
        let rows = vec![row(1, 10, "USD", 100, ts(4, 1))];
        assert!(store.record_purchase(&rows).await.is_ok());
        assert!(store.record_purchase(&[renewal]).await.is_ok());

        let Ok(summary) = store
            .summarize_revenue(DateRange {
                start: day(4, 1),
                end: day(4, 30),
            })
            .await
        else {
            panic!("summary failed");
        };
        assert_eq!(summary.len(), 1);
        assert!((summary[0].recognized_amount - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn successor_is_the_adjacent_event_of_the_lineage() {
        let store = MemoryRevenueStore::new(|row, next, _| {
            let expected = if row.event_id == id(1) {
                Some(ts(5, 1))
            } else if row.event_id == id(2) {
                Some(ts(6, 1))
            } else {
                None
            };
            Some(if next == expected { 1.0 } else { -100.0 })
        });
        let mut second = row(2, 10, "USD", 100, ts(4, 20));
        second.term_start = Some(ts(5, 1));
        // No term start: the successor's valid_from stands in for it.
        let third = row(3, 10, "USD", 100, ts(6, 1));
        let other_service = row(4, 11, "USD", 100, ts(4, 10));
        // Recorded out of order to show lineage ordering is by valid_from.
        assert!(store.record_purchase(&[third]).await.is_ok());
        assert!(store.record_purchase(&[other_service]).await.is_ok());
        assert!(store.record_purchase(&[second]).await.is_ok());
        assert!(store.record_purchase(&[row(1, 10, "USD", 100, ts(4, 1))]).await.is_ok());

        let Ok(summary) = store
            .summarize_revenue(DateRange {
                start: day(4, 1),
                end: day(6, 30),
            })
            .await
        else {
            panic!("summary failed");
        };
        assert_eq!(summary.len(), 1);
        assert!((summary[0].recognized_amount - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_summary() {
        let store = MemoryRevenueStore::new(on_valid_day);
        let summary = store
            .summarize_revenue(DateRange {
                start: day(4, 1),
                end: day(4, 1),
            })
            .await;
        assert!(matches!(summary, Ok(ref s) if s.is_empty()));
    }
}
