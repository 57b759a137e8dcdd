//! Shared application state injected into all Axum handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::AdminStore;
use crate::persistence::RevenueStore;
use crate::service::RevenueService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Revenue service for ingestion and queries.
    pub revenue_service: Arc<RevenueService>,
    /// Per-user values written through the admin endpoint.
    pub admin_store: Arc<AdminStore>,
    /// Username to password table for basic auth.
    pub admin_accounts: Arc<BTreeMap<String, String>>,
}

impl AppState {
    /// Builds state around `store` with an empty admin store.
    #[must_use]
    pub fn new(store: Arc<dyn RevenueStore>, admin_accounts: BTreeMap<String, String>) -> Self {
        Self {
            revenue_service: Arc::new(RevenueService::new(store)),
            admin_store: Arc::new(AdminStore::new()),
            admin_accounts: Arc::new(admin_accounts),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("revenue_service", &self.revenue_service)
            .field("admin_store", &self.admin_store)
            .field("admin_users", &self.admin_accounts.keys().collect::<Vec<_>>())
            .finish()
    }
}
