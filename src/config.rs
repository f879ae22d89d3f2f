// Startup configuration, read once from the environment.

use crate::core::banishment::BanishmentConfig;
use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "data/banishment.db";
const DEFAULT_PREFIX: &str = "!";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Create a .env file or export it.")]
    Missing(&'static str),
    #[error("{name} must be a Discord id, got {value:?}")]
    InvalidId { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub prefix: String,
    pub database_path: String,
    pub banishment: BanishmentConfig,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let id = |name: &'static str| {
            let value = required(name)?;
            value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&id| id != 0)
                .ok_or(ConfigError::InvalidId { name, value })
        };

        Ok(Self {
            token: required("DISCORD_TOKEN")?,
            prefix: lookup("BOT_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            database_path: lookup("BANISH_DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            banishment: BanishmentConfig {
                required_role_id: id("BANISH_REQUIRED_ROLE_ID")?,
                muted_role_id: id("BANISH_MUTED_ROLE_ID")?,
            },
        })
    }
}
