//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names follow the wire format accepted by existing billing
//! clients; domain types are produced from them via `From` impls.

pub mod common_dto;
pub mod purchase_dto;
pub mod revenue_dto;

pub use common_dto::*;
pub use purchase_dto::*;
pub use revenue_dto::*;
