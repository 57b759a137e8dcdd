//! Service layer: business logic orchestration.
//!
//! [`RevenueService`] validates purchases, expands them into revenue rows
//! and hands them to the [`crate::persistence::RevenueStore`]; it also
//! answers revenue queries by day and by month.

pub mod revenue_service;

pub use revenue_service::RevenueService;
