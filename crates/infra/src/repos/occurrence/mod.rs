mod inmemory;
mod sqlite;

use super::shared::DeleteResult;
use chrono::{DateTime, Utc};
pub use inmemory::InMemoryOccurrenceRepo;
use nagging_bot_domain::{Occurrence, OccurrenceStatus, ID};
pub use sqlite::SqliteOccurrenceRepo;

#[async_trait::async_trait]
pub trait IOccurrenceRepo: Send + Sync {
    async fn get(&self, occurrence_id: ID) -> anyhow::Result<Option<Occurrence>>;
    async fn list_by_reminder(&self, reminder_id: ID) -> anyhow::Result<Vec<Occurrence>>;
    /// `Created` occurrences firing within `[start, end]`, ordered by fire time.
    /// No lower bound is applied when `start` is `None`.
    async fn list_pending_in_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Occurrence>>;
    /// Stores the `Occurrence` and returns the stored copy with its id assigned
    async fn create(&self, occurrence: &Occurrence) -> anyhow::Result<Occurrence>;
    /// Moves the `Occurrence` to `status` if its lifecycle allows it.
    /// Returns whether anything changed, an unknown id is not an error.
    async fn update_status(&self, occurrence_id: ID, status: OccurrenceStatus)
        -> anyhow::Result<bool>;
    async fn delete_by_reminder(&self, reminder_id: ID) -> anyhow::Result<DeleteResult>;
}
