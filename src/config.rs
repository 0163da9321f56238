use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    /// When unset the server runs on the seeded in-memory store
    pub database_url: Option<String>,
    pub api_prefix: String,

    // Rate limiting
    pub rate_login_per_min: u32,

    /// Check-ins at or after this local time are marked late
    pub work_start: NaiveTime,

    pub log_dir: String,
    pub log_level: String,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("server_addr", &self.server_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("api_prefix", &self.api_prefix)
            .field("rate_login_per_min", &self.rate_login_per_min)
            .field("work_start", &self.work_start)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            database_url: None,
            api_prefix: "/api".to_string(),
            rate_login_per_min: 60,
            work_start: default_work_start(),
            log_dir: "logs".to_string(),
            log_level: "debug".to_string(),
        }
    }
}

pub fn default_work_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default();

        let rate_login_per_min = match env::var("RATE_LOGIN_PER_MIN") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("RATE_LOGIN_PER_MIN must be a number, got {v:?}"))?,
            Err(_) => defaults.rate_login_per_min,
        };
        if rate_login_per_min == 0 {
            bail!("RATE_LOGIN_PER_MIN must be greater than zero");
        }

        let work_start = match env::var("WORK_START_TIME") {
            Ok(v) => parse_work_start(&v)?,
            Err(_) => defaults.work_start,
        };

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            rate_login_per_min,
            work_start,
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_work_start(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .with_context(|| format!("WORK_START_TIME must be HH:MM, got {value:?}"))
}
