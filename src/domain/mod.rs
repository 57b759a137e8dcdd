//! Domain layer: identifiers, dates, purchase events and revenue summaries.
//!
//! This module holds the server-side model: the strict identifier and
//! date codecs, the expansion of a purchase into revenue event rows, the
//! per-currency revenue aggregation, and the admin key-value store.

pub mod admin_store;
pub mod codec_error;
pub mod identifier;
pub mod purchase;
pub mod revenue;
pub mod revenue_date;

pub use admin_store::AdminStore;
pub use codec_error::CodecError;
pub use identifier::Identifier;
pub use purchase::{ProductLine, PurchaseError, PurchaseEvent, RevenueEventRow, Term};
pub use revenue::{RecognizedRevenue, RevenueSummary, summarize};
pub use revenue_date::{DateRange, RevenueDate};
