//! User persistence seam. Handlers only see [`UserStore`]; the backing
//! implementation is chosen when the application state is built.

use async_trait::async_trait;

use crate::models::{NewUser, User, UserChanges};

pub mod memory;

pub use memory::InMemoryUserStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    NotFound(u32),
    #[error("store backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by id
    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn get(&self, id: u32) -> StoreResult<User>;

    async fn create(&self, fields: NewUser) -> StoreResult<User>;

    async fn update(&self, id: u32, changes: UserChanges) -> StoreResult<User>;

    async fn delete(&self, id: u32) -> StoreResult<()>;
}
