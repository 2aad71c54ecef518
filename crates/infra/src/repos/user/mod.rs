mod inmemory;
mod sqlite;

pub use inmemory::InMemoryUserRepo;
use nagging_bot_domain::{User, ID};
pub use sqlite::SqliteUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn get(&self, user_id: ID) -> anyhow::Result<Option<User>>;
    async fn get_by_external_id(&self, external_id: i64) -> anyhow::Result<Option<User>>;
    /// Inserts the `User` or, when a `User` with the same external id exists,
    /// overwrites its profile fields while keeping its internal id.
    /// Returns the stored copy.
    async fn upsert(&self, user: &User) -> anyhow::Result<User>;
}
