//! # revenue-tracker
//!
//! REST API that records purchase and subscription events for a billing
//! system and reports recognized revenue by day or by month.
//!
//! Revenue allocation itself is performed by the database function
//! `revenue_tracker.calculate_event_revenue`; this service validates
//! requests, stores one revenue event per product line, and shapes the
//! per-currency summaries the function produces.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers, CORS, Basic Auth (api/)
//!     │
//!     ├── RevenueService (service/)
//!     │
//!     ├── Codecs, PurchaseEvent, RevenueSummary (domain/)
//!     │
//!     └── RevenueStore (persistence/)
//!             ├── PostgreSQL + calculate_event_revenue
//!             └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
