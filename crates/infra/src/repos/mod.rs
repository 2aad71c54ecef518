mod occurrence;
mod reminder;
mod shared;
mod user;

use anyhow::Context;
use occurrence::{InMemoryOccurrenceRepo, SqliteOccurrenceRepo};
use reminder::{InMemoryReminderRepo, SqliteReminderRepo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{path::Path, sync::Arc};
use tracing::info;
use user::{InMemoryUserRepo, SqliteUserRepo};

pub use occurrence::IOccurrenceRepo;
pub use reminder::IReminderRepo;
pub use shared::DeleteResult;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub occurrences: Arc<dyn IOccurrenceRepo>,
}

impl Repos {
    /// Opens (or creates) the SQLite database at `path` and runs the
    /// migrations. The pool holds a single connection so every statement
    /// is serialized.
    pub async fn create_sqlite(path: &Path) -> anyhow::Result<Self> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Unable to create directory {}", dir.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Unable to open SQLite database {}", path.display()))?;

        info!("DB MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB MIGRATIONS ... [done]");

        Ok(Self {
            users: Arc::new(SqliteUserRepo::new(pool.clone())),
            reminders: Arc::new(SqliteReminderRepo::new(pool.clone())),
            occurrences: Arc::new(SqliteOccurrenceRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            occurrences: Arc::new(InMemoryOccurrenceRepo::new()),
        }
    }
}
