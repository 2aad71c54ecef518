mod inmemory;
mod sqlite;

pub use inmemory::InMemoryReminderRepo;
use nagging_bot_domain::{Reminder, ID};
pub use sqlite::SqliteReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn get(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>>;
    /// All `Reminder`s owned by the given `User`, ordered by id
    async fn list_by_user(&self, user_id: ID) -> anyhow::Result<Vec<Reminder>>;
    /// Stores the `Reminder` and returns the stored copy with its id assigned
    async fn create(&self, reminder: &Reminder) -> anyhow::Result<Reminder>;
    /// Replaces the stored `Reminder` with the same id, unknown ids are ignored
    async fn update(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn delete(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>>;
}
