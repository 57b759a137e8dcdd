//! PostgreSQL implementation of the revenue store.
//!
//! Revenue allocation is delegated to the database function
//! `revenue_tracker.calculate_event_revenue`; this module only binds the
//! query range and decodes the per-currency rows it produces.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::RevenueStore;
use crate::config::AppConfig;
use crate::domain::{DateRange, RevenueEventRow, RevenueSummary};
use crate::error::ApiError;

const INSERT_REVENUE_EVENT: &str = "INSERT INTO revenue_tracker.revenue_event \
     (event_id, service_id, customer_id, currency_code, amount, term_start_dt, term_end_dt, valid_from_ts, created, paid) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

// Each event is paired with the event of the same service that starts
// where it ends; the successor's start bounds the recognition window.
const SUMMARIZE_REVENUE: &str = "SELECT \
         r.currency_code, \
         count(DISTINCT r.service_id) AS service_subs, \
         sum(rev.recognized_amount)::float8 AS recognized_amount \
     FROM revenue_tracker.revenue_event r \
     LEFT JOIN revenue_tracker.revenue_event rf \
         ON rf.service_id = r.service_id \
        AND rf.valid_from_ts = r.valid_to_ts \
     CROSS JOIN revenue_tracker.calculate_event_revenue( \
         event => r, \
         next_event_start_dt => lower(rf.revenue_ts), \
         revenue_query_range => daterange($1, $2, '[]') \
     ) AS rev \
     GROUP BY 1 \
     ORDER BY 1";

/// PostgreSQL-backed revenue store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresRevenueStore {
    pool: PgPool,
}

impl PostgresRevenueStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the database cannot be reached.
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RevenueStore for PostgresRevenueStore {
    async fn record_purchase(&self, rows: &[RevenueEventRow]) -> Result<(), ApiError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ApiError::Persistence(format!("Unable to start transaction: {e}")))?;

        // An early return drops `tx` uncommitted, which rolls it back.
        for row in rows {
            sqlx::query(INSERT_REVENUE_EVENT)
                .bind(row.event_id.as_uuid())
                .bind(row.service_id.as_uuid())
                .bind(row.customer_id.as_uuid())
                .bind(&row.currency_code)
                .bind(row.extended_amount)
                .bind(row.term_start)
                .bind(row.term_end)
                .bind(row.valid_from)
                .bind(row.created)
                .bind(row.paid)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    ApiError::Persistence(format!("Unable to execute transaction: {e}"))
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| ApiError::Persistence(format!("Unable to commit transaction: {e}")))
    }

    async fn summarize_revenue(&self, range: DateRange) -> Result<Vec<RevenueSummary>, ApiError> {
        let rows = sqlx::query(SUMMARIZE_REVENUE)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::Query(format!("Unable to query revenue data: {e}")))?;

        rows.iter()
            .map(|row| -> Result<RevenueSummary, sqlx::Error> {
                let recognized: Option<f64> = row.try_get("recognized_amount")?;
                Ok(RevenueSummary {
                    currency_code: row.try_get("currency_code")?,
                    service_subs: row.try_get("service_subs")?,
                    recognized_amount: recognized.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to decode revenue summary row");
                ApiError::Query("Unable to parse revenue data".to_string())
            })
    }

    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| ApiError::Query(e.to_string()))
    }
}
