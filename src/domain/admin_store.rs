//! Process-local key-value store for the admin endpoint.
//!
//! Values are keyed by the authenticated username and live only as long
//! as the process. Nothing in the revenue domain reads them.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// In-memory `username -> value` map shared across requests.
#[derive(Debug, Default)]
pub struct AdminStore {
    values: RwLock<HashMap<String, String>>,
}

impl AdminStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `user`, returning the value it replaced.
    pub async fn put(&self, user: &str, value: String) -> Option<String> {
        self.values.write().await.insert(user.to_string(), value)
    }

    /// Returns the value last stored for `user`.
    pub async fn get(&self, user: &str) -> Option<String> {
        self.values.read().await.get(user).cloned()
    }

    /// Number of users with a stored value.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}
