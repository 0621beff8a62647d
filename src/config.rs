use anyhow::{Context, anyhow};
use chrono::{FixedOffset, Offset, Utc};
use dotenvy::dotenv;
use std::{env, str::FromStr};
use tracing::Level;

/// Selects the in-memory store instead of a JSON file.
pub const MEMORY_DATA_FILE: &str = ":memory:";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub data_file: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_login_per_min: u32,

    /// Offset used to decide which calendar day is "today"
    pub today_offset: FixedOffset,

    pub log_dir: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:5000".to_string(),
            data_file: "db.json".to_string(),
            api_prefix: "/api".to_string(),
            rate_login_per_min: 60,
            // Africa/Kigali
            today_offset: FixedOffset::east_opt(2 * 3600).unwrap_or(Utc.fix()),
            log_dir: "logs".to_string(),
            log_level: Level::INFO,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{name}={raw:?} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        let offset_minutes: i32 = parse_var(
            "TODAY_UTC_OFFSET_MINUTES",
            defaults.today_offset.local_minus_utc() / 60,
        )?;
        let today_offset = FixedOffset::east_opt(offset_minutes * 60)
            .with_context(|| format!("TODAY_UTC_OFFSET_MINUTES={offset_minutes} is out of range"))?;

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            data_file: env::var("DATA_FILE").unwrap_or(defaults.data_file),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            rate_login_per_min: parse_var("RATE_LOGIN_PER_MIN", defaults.rate_login_per_min)?,
            today_offset,
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.data_file == MEMORY_DATA_FILE
    }
}
