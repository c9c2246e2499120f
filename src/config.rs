use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::error::BotError;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Environment variable pointing at the optional settings file.
pub const CONFIG_PATH_VAR: &str = "HOMEWORK_BOT_CONFIG";

/// The three secrets the bot cannot start without.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"[REDACTED]")
            .field("telegram_token", &"[REDACTED]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve every credential through `lookup`. Empty values count as missing,
    /// and all missing names are reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            }),
            (practicum_token, telegram_token, telegram_chat_id) => {
                let missing: Vec<&'static str> = [
                    (PRACTICUM_TOKEN, practicum_token.is_none()),
                    (TELEGRAM_TOKEN, telegram_token.is_none()),
                    (TELEGRAM_CHAT_ID, telegram_chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                for name in &missing {
                    error!("Required environment variable is missing or empty: {}", name);
                }
                Err(BotError::ConfigMissing(missing))
            }
        }
    }
}

/// Where the first request's `from_date` starts.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorStart {
    /// Fetch the whole history, so the current status is reported on startup.
    #[default]
    Zero,
    /// Only report changes made after startup.
    Now,
}

impl CursorStart {
    pub fn initial(self) -> i64 {
        match self {
            CursorStart::Zero => 0,
            CursorStart::Now => chrono::Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,
    #[serde(default)]
    pub initial_cursor: CursorStart,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_period_secs: default_retry_period_secs(),
            initial_cursor: CursorStart::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written without ANSI colours.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_retry_period_secs() -> u64 {
    600
}

fn default_log_level() -> String {
    "info,homework_bot=debug".to_string()
}

impl Settings {
    /// Settings path from `HOMEWORK_BOT_CONFIG`, falling back to `config.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }

    /// Load settings from `path`. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).context("Failed to parse config file")?;

        if settings.poller.retry_period_secs == 0 {
            anyhow::bail!("poller.retry_period_secs must be greater than zero");
        }
        if settings.poller.endpoint.trim().is_empty() {
            anyhow::bail!("poller.endpoint must not be empty");
        }

        Ok(settings)
    }
}
