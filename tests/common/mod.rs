//! Shared helpers for router-level tests.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use revenue_tracker::api::build_app;
use revenue_tracker::app_state::AppState;
use revenue_tracker::config::{DEFAULT_ADMIN_ACCOUNTS, parse_accounts};
use revenue_tracker::domain::{DateRange, RevenueEventRow, RevenueSummary};
use revenue_tracker::error::ApiError;
use revenue_tracker::persistence::{MemoryRevenueStore, RevenueStore};
use serde_json::Value;
use tower::ServiceExt;

pub const FIXTURE_EVENT_ID: &str = "3c1212d0-0281-11ef-8c4d-98fa9b5e176f";

pub fn fixture_purchase() -> Value {
    let raw = include_str!("../testdata/test_purchase.json");
    serde_json::from_str(raw).unwrap_or_else(|e| panic!("fixture is not JSON: {e}"))
}

/// Recognizes an event's full extended amount on every day of the range
/// that falls on or after the day it became valid, once per query.
#[allow(clippy::cast_precision_loss)]
pub fn full_amount_once_valid(
    row: &RevenueEventRow,
    _next_event_start: Option<DateTime<Utc>>,
    range: DateRange,
) -> Option<f64> {
    (row.valid_from.date_naive() <= range.end).then_some(row.extended_amount as f64)
}

#[derive(Debug)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryRevenueStore>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryRevenueStore::new(full_amount_once_valid));
    let accounts = parse_accounts(DEFAULT_ADMIN_ACCOUNTS).unwrap_or_default();
    let state = AppState::new(Arc::clone(&store) as Arc<dyn RevenueStore>, accounts);
    TestApp {
        router: build_app(state.clone()),
        state,
        store,
    }
}

pub fn app_with_store(store: Arc<dyn RevenueStore>) -> Router {
    let accounts = parse_accounts(DEFAULT_ADMIN_ACCOUNTS).unwrap_or_default();
    build_app(AppState::new(store, accounts))
}

/// A store whose every call fails, standing in for an unreachable database.
#[derive(Debug)]
pub struct UnavailableStore;

#[async_trait]
impl RevenueStore for UnavailableStore {
    async fn record_purchase(&self, _rows: &[RevenueEventRow]) -> Result<(), ApiError> {
        Err(ApiError::Persistence(
            "Unable to start transaction: connection refused".to_string(),
        ))
    }

    async fn summarize_revenue(&self, _range: DateRange) -> Result<Vec<RevenueSummary>, ApiError> {
        Err(ApiError::Query(
            "Unable to query revenue data: connection refused".to_string(),
        ))
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Err(ApiError::Query("connection refused".to_string()))
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let Ok(response) = router.clone().oneshot(request).await else {
        panic!("request failed");
    };
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("failed to read body");
    };
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|e| panic!("bad request: {e}"))
}

pub async fn post(router: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(router, post_json(uri, body)).await
}
