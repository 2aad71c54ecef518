use std::{path::PathBuf, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SCHEDULER_INTERVAL_SECS: u64 = 1;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("The {0} environment variable is required")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Token used to authenticate against the Bot API
    pub bot_token: String,
    /// Base url of the Bot API, overridable for tests and self hosted servers
    pub bot_api_url: String,
    /// Location of the SQLite database. In-memory stores are used when `None`.
    pub db_path: Option<PathBuf>,
    /// Cooldown between two polling attempts
    pub poll_interval: Duration,
    /// Long polling timeout of a single `getUpdates` request
    pub poll_timeout: Duration,
    pub scheduler_interval: Duration,
    /// External id of the only user allowed to run `/test`
    pub demo_user_id: Option<i64>,
}

impl Config {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            bot_api_url: DEFAULT_BOT_API_URL.into(),
            db_path: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
            scheduler_interval: Duration::from_secs(DEFAULT_SCHEDULER_INTERVAL_SECS),
            demo_user_id: None,
        }
    }

    /// Reads the configuration from the process environment, after loading
    /// a `.env` file if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F: Fn(&str) -> Option<String>>(get: F) -> Result<Self, ConfigError> {
        let bot_token = match get("BOT_TOKEN") {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Err(ConfigError::MissingVar("BOT_TOKEN")),
        };
        let mut config = Self::new(bot_token);

        if let Some(url) = get("BOT_API_URL").filter(|url| !url.trim().is_empty()) {
            config.bot_api_url = url.trim().trim_end_matches('/').to_string();
        }

        config.db_path = get("DB_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(|path| PathBuf::from(path.trim()));
        if config.db_path.is_none() {
            info!("Did not find DB_PATH environment variable. Going to use in-memory stores.");
        }

        config.poll_interval =
            parse_secs(&get, "POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS);
        config.poll_timeout = parse_secs(&get, "POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT_SECS);
        config.scheduler_interval = parse_secs(
            &get,
            "SCHEDULER_INTERVAL_SECS",
            DEFAULT_SCHEDULER_INTERVAL_SECS,
        );

        config.demo_user_id = match get("DEMO_USER_ID") {
            Some(id) => match id.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(
                        "The given DEMO_USER_ID: {} is not valid, /test will be disabled.",
                        id
                    );
                    None
                }
            },
            None => None,
        };

        Ok(config)
    }
}

fn parse_secs<F: Fn(&str) -> Option<String>>(get: &F, key: &str, default: u64) -> Duration {
    let secs = match get(key) {
        None => default,
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
    };
    Duration::from_secs(secs)
}
