use std::sync::Arc;

use crate::config::AppConfig;
use crate::middleware::auth::{PlaceholderTokenResolver, TokenResolver};
use crate::store::{InMemoryUserStore, UserStore};

/// Shared, read-only handles cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<dyn TokenResolver>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<dyn TokenResolver>) -> Self {
        Self { users, tokens }
    }

    /// In-memory store and placeholder token resolution, seeded per config
    pub fn from_config(config: &AppConfig) -> Self {
        let store = if config.store.seed_demo_users {
            InMemoryUserStore::with_demo_users()
        } else {
            InMemoryUserStore::new()
        };

        Self::new(Arc::new(store), Arc::new(PlaceholderTokenResolver))
    }
}
