use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::{lock, Table};
use nagging_bot_domain::{Reminder, ID};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Mutex,
};

/// Canonical records plus an index from owner to reminder ids. Both live
/// behind the same lock so that readers never see them disagree.
#[derive(Default)]
struct Reminders {
    by_id: BTreeMap<ID, Reminder>,
    by_owner: HashMap<ID, BTreeSet<ID>>,
    ids: Table<()>,
}

impl Reminders {
    fn index(&mut self, reminder: &Reminder) {
        self.by_owner
            .entry(reminder.user_id)
            .or_default()
            .insert(reminder.id);
    }

    fn unindex(&mut self, reminder: &Reminder) {
        if let Some(ids) = self.by_owner.get_mut(&reminder.user_id) {
            ids.remove(&reminder.id);
            if ids.is_empty() {
                self.by_owner.remove(&reminder.user_id);
            }
        }
    }
}

pub struct InMemoryReminderRepo {
    reminders: Mutex<Reminders>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Reminders::default()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn get(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        Ok(lock(&self.reminders).by_id.get(&reminder_id).cloned())
    }

    async fn list_by_user(&self, user_id: ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = lock(&self.reminders);
        let ids = match reminders.by_owner.get(&user_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| reminders.by_id.get(id))
            .cloned()
            .collect())
    }

    async fn create(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let mut reminders = lock(&self.reminders);
        let mut reminder = reminder.clone();
        if reminder.id == 0 {
            reminder.id = reminders.ids.next_id();
        } else {
            reminders.ids.observe_id(reminder.id);
        }
        if let Some(previous) = reminders.by_id.get(&reminder.id).cloned() {
            reminders.unindex(&previous);
        }
        reminders.index(&reminder);
        reminders.by_id.insert(reminder.id, reminder.clone());
        Ok(reminder)
    }

    async fn update(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let mut reminders = lock(&self.reminders);
        let previous = match reminders.by_id.get(&reminder.id) {
            Some(previous) => previous.clone(),
            None => return Ok(()),
        };
        reminders.unindex(&previous);
        reminders.index(reminder);
        reminders.by_id.insert(reminder.id, reminder.clone());
        Ok(())
    }

    async fn delete(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let mut reminders = lock(&self.reminders);
        let deleted = reminders.by_id.remove(&reminder_id);
        if let Some(reminder) = &deleted {
            reminders.unindex(reminder);
        }
        Ok(deleted)
    }
}
