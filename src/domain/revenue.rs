//! Recognized revenue summaries.
//!
//! The allocation of an event's value to a date range is performed by the
//! storage layer's revenue function. This module only defines the shape of
//! its per-event output ([`RecognizedRevenue`]) and the per-currency
//! aggregation that turns it into [`RevenueSummary`] rows.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Identifier;

/// Revenue recognized for one currency over a queried range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueSummary {
    /// Currency code the amounts are denominated in.
    pub currency_code: String,
    /// Number of distinct services contributing revenue.
    pub service_subs: i64,
    /// Sum of recognized amounts, in the smallest currency denomination.
    pub recognized_amount: f64,
}

/// Output of the revenue allocation function for a single event.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedRevenue {
    /// Currency of the event.
    pub currency_code: String,
    /// Service the event belongs to.
    pub service_id: Identifier,
    /// Amount attributed to the queried range.
    pub recognized_amount: f64,
}

/// Groups per-event allocations by currency.
///
/// Each summary counts the distinct services seen for that currency and
/// sums their recognized amounts. Output is ordered by currency code.
#[must_use]
pub fn summarize<I>(allocations: I) -> Vec<RevenueSummary>
where
    I: IntoIterator<Item = RecognizedRevenue>,
{
    let mut by_currency: BTreeMap<String, (BTreeSet<Identifier>, f64)> = BTreeMap::new();
    for alloc in allocations {
        let (services, total) = by_currency.entry(alloc.currency_code).or_default();
        services.insert(alloc.service_id);
        *total += alloc.recognized_amount;
    }
    by_currency
        .into_iter()
        .map(|(currency_code, (services, recognized_amount))| RevenueSummary {
            currency_code,
            service_subs: i64::try_from(services.len()).unwrap_or(i64::MAX),
            recognized_amount,
        })
        .collect()
}
