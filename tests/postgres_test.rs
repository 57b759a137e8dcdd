//! PostgreSQL-backed ingestion tests.
//!
//! Ignored by default. Run with a disposable database:
//!
//! ```text
//! TEST_DATABASE_URL=postgres://localhost/revenue_tracker_test cargo test -- --ignored
//! ```
//!
//! The revenue event table is created if missing; revenue queries need
//! the `calculate_event_revenue` function and are not exercised here.

#![allow(clippy::panic, clippy::indexing_slicing)]

use chrono::{DateTime, TimeZone, Utc};
use revenue_tracker::domain::{Identifier, ProductLine, PurchaseEvent, Term};
use revenue_tracker::error::ApiError;
use revenue_tracker::persistence::{PostgresRevenueStore, RevenueStore};
use sqlx::PgPool;

const TEST_SCHEMA: &str = "
CREATE SCHEMA IF NOT EXISTS revenue_tracker;
CREATE TABLE IF NOT EXISTS revenue_tracker.revenue_event (
    event_id      uuid        NOT NULL,
    service_id    uuid        NOT NULL,
    customer_id   uuid        NOT NULL,
    currency_code text        NOT NULL,
    amount        bigint      NOT NULL,
    term_start_dt timestamptz,
    term_end_dt   timestamptz,
    valid_from_ts timestamptz NOT NULL,
    created       timestamptz NOT NULL,
    paid          timestamptz NOT NULL,
    PRIMARY KEY (event_id, service_id)
);";

async fn connect_db() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    sqlx::raw_sql(TEST_SCHEMA).execute(&pool).await.ok()?;
    Some(pool)
}

fn ts(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("valid timestamp"))
}

fn purchase(services: &[uuid::Uuid]) -> PurchaseEvent {
    PurchaseEvent {
        event_id: Identifier::from_uuid(uuid::Uuid::new_v4()),
        event_dt: ts(25),
        created: ts(25),
        paid: ts(26),
        customer_id: Identifier::from_uuid(uuid::Uuid::new_v4()),
        currency_code: "USD".to_string(),
        products: services
            .iter()
            .map(|s| ProductLine {
                service_id: Identifier::from_uuid(*s),
                product_id: Identifier::from_uuid(uuid::Uuid::new_v4()),
                amount: 1250,
                quantity: 4,
                term: Some(Term {
                    start: Some(ts(25)),
                    end: None,
                }),
            })
            .collect(),
    }
}

async fn stored_amounts(pool: &PgPool, event: &PurchaseEvent) -> Vec<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT amount FROM revenue_tracker.revenue_event WHERE event_id = $1 ORDER BY amount",
    )
    .bind(event.event_id.as_uuid())
    .fetch_all(pool)
    .await
    .unwrap_or_else(|e| panic!("select failed: {e}"))
}

#[tokio::test]
#[ignore]
async fn records_one_row_per_line() {
    let Some(pool) = connect_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let store = PostgresRevenueStore::new(pool.clone());
    let event = purchase(&[uuid::Uuid::new_v4(), uuid::Uuid::new_v4()]);
    let Ok(rows) = event.revenue_rows() else {
        panic!("valid event");
    };

    assert!(store.record_purchase(&rows).await.is_ok());
    assert_eq!(stored_amounts(&pool, &event).await, vec![5000, 5000]);
}

#[tokio::test]
#[ignore]
async fn failing_line_leaves_no_rows() {
    let Some(pool) = connect_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let store = PostgresRevenueStore::new(pool.clone());
    let service = uuid::Uuid::new_v4();
    let event = purchase(&[service, service]);
    let Ok(rows) = event.revenue_rows() else {
        panic!("valid event");
    };

    let result = store.record_purchase(&rows).await;
    assert!(matches!(result, Err(ApiError::Persistence(_))));
    assert!(stored_amounts(&pool, &event).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn resubmission_fails() {
    let Some(pool) = connect_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let store = PostgresRevenueStore::new(pool.clone());
    let event = purchase(&[uuid::Uuid::new_v4()]);
    let Ok(rows) = event.revenue_rows() else {
        panic!("valid event");
    };

    assert!(store.record_purchase(&rows).await.is_ok());
    assert!(store.record_purchase(&rows).await.is_err());
    assert_eq!(stored_amounts(&pool, &event).await.len(), 1);
}

#[tokio::test]
#[ignore]
async fn ping_reaches_database() {
    let Some(pool) = connect_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    assert!(PostgresRevenueStore::new(pool).ping().await.is_ok());
}
