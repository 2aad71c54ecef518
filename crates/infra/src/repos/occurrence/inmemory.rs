use super::IOccurrenceRepo;
use crate::repos::shared::{inmemory_repo::*, DeleteResult};
use chrono::{DateTime, Utc};
use nagging_bot_domain::{Occurrence, OccurrenceStatus, ID};
use std::sync::Mutex;

pub struct InMemoryOccurrenceRepo {
    occurrences: Mutex<Table<Occurrence>>,
}

impl InMemoryOccurrenceRepo {
    pub fn new() -> Self {
        Self {
            occurrences: Mutex::new(Table::new()),
        }
    }
}

#[async_trait::async_trait]
impl IOccurrenceRepo for InMemoryOccurrenceRepo {
    async fn get(&self, occurrence_id: ID) -> anyhow::Result<Option<Occurrence>> {
        Ok(find(occurrence_id, &self.occurrences))
    }

    async fn list_by_reminder(&self, reminder_id: ID) -> anyhow::Result<Vec<Occurrence>> {
        Ok(find_by(&self.occurrences, |o| o.reminder_id == reminder_id))
    }

    async fn list_pending_in_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Occurrence>> {
        let mut pending = find_by(&self.occurrences, |o| {
            o.status == OccurrenceStatus::Created
                && o.fire_at <= end
                && start.map(|start| o.fire_at >= start).unwrap_or(true)
        });
        pending.sort_by_key(|o| (o.fire_at, o.id));
        Ok(pending)
    }

    async fn create(&self, occurrence: &Occurrence) -> anyhow::Result<Occurrence> {
        Ok(insert(occurrence, &self.occurrences))
    }

    async fn update_status(
        &self,
        occurrence_id: ID,
        status: OccurrenceStatus,
    ) -> anyhow::Result<bool> {
        let updated = update_one(occurrence_id, &self.occurrences, |o| {
            if o.status.can_transition_to(status) {
                o.status = status;
                true
            } else {
                false
            }
        });
        Ok(updated.unwrap_or(false))
    }

    async fn delete_by_reminder(&self, reminder_id: ID) -> anyhow::Result<DeleteResult> {
        let deleted = find_and_delete_by(&self.occurrences, |o| o.reminder_id == reminder_id);
        Ok(DeleteResult {
            deleted_count: deleted.len() as i64,
        })
    }
}
