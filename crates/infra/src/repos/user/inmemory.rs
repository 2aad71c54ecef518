use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use nagging_bot_domain::{User, ID};
use std::sync::Mutex;

pub struct InMemoryUserRepo {
    users: Mutex<Table<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Table::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn get(&self, user_id: ID) -> anyhow::Result<Option<User>> {
        Ok(find(user_id, &self.users))
    }

    async fn get_by_external_id(&self, external_id: i64) -> anyhow::Result<Option<User>> {
        Ok(find_by(&self.users, |u| u.external_id == external_id)
            .into_iter()
            .next())
    }

    async fn upsert(&self, user: &User) -> anyhow::Result<User> {
        // Lookup and insert happen under the same lock so that concurrent
        // upserts for one external id end up with a single row
        let mut table = lock(&self.users);
        if let Some(existing) = table
            .rows
            .iter_mut()
            .find(|u| u.external_id == user.external_id)
        {
            let id = existing.id;
            *existing = User { id, ..user.clone() };
            return Ok(existing.clone());
        }

        let mut user = user.clone();
        user.id = table.next_id();
        table.rows.push(user.clone());
        Ok(user)
    }
}
