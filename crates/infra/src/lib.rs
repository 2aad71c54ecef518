mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, ConfigError};
pub use repos::{DeleteResult, IOccurrenceRepo, IReminderRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct NagContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl NagContext {
    pub fn create_inmemory(config: Config) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the configuration.
/// Stores are backed by SQLite when a database path is configured and
/// kept in memory otherwise.
pub async fn setup_context(config: Config) -> anyhow::Result<NagContext> {
    let repos = match &config.db_path {
        Some(path) => {
            info!("Using SQLite database at {}", path.display());
            Repos::create_sqlite(path).await?
        }
        None => {
            info!("Using in-memory stores, data is lost on restart");
            Repos::create_inmemory()
        }
    };
    Ok(NagContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
    })
}
