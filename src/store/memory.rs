use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, UserStore};
use crate::models::user::STATUS_ACTIVE;
use crate::models::{NewUser, User, UserChanges};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<u32, User>,
    last_id: u32,
}

/// Process-local store; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the two demo accounts served by the mock listing
    pub fn with_demo_users() -> Self {
        let now = Utc::now();
        let mut inner = Inner::default();

        for (name, email) in [("Zhang San", "zhangsan@example.com"), ("Li Si", "lisi@example.com")] {
            inner.last_id += 1;
            inner.users.insert(
                inner.last_id,
                User {
                    id: inner.last_id,
                    name: name.to_string(),
                    email: email.to_string(),
                    password: String::new(),
                    avatar: String::new(),
                    status: STATUS_ACTIVE,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn get(&self, id: u32) -> StoreResult<User> {
        let inner = self.inner.read().await;
        inner.users.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("user id space exhausted".to_string()))?;

        let now = Utc::now();
        let user = User {
            id,
            name: fields.name,
            email: fields.email,
            password: fields.password,
            avatar: fields.avatar,
            status: STATUS_ACTIVE,
            created_at: now,
            updated_at: now,
        };

        inner.last_id = id;
        inner.users.insert(id, user.clone());
        tracing::debug!("Created user {}", id);
        Ok(user)
    }

    async fn update(&self, id: u32, changes: UserChanges) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(avatar) = changes.avatar {
            user.avatar = avatar;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: u32) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .users
            .remove(&id)
            .map(|_| tracing::debug!("Deleted user {}", id))
            .ok_or(StoreError::NotFound(id))
    }
}
