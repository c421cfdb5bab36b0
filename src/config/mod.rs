//! Configuration module for the timetable backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::{Result, ScheduleError};
use crate::models::ChangeKindPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the upstream schedule document
    pub source_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Delay between background refreshes
    pub refresh_interval: Duration,
    /// Timeout applied to each upstream fetch
    pub fetch_timeout: Duration,
    /// Whether change descriptors are classified or dropped
    pub change_kinds: ChangeKindPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let source_url = env::var("TIMETABLE_SOURCE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ScheduleError::config("TIMETABLE_SOURCE_URL is not set"))?;

        let bind_addr = env::var("TIMETABLE_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .map_err(|e| ScheduleError::config(format!("Invalid TIMETABLE_BIND_ADDR: {}", e)))?;

        let log_level = env::var("TIMETABLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let refresh_interval = Duration::from_secs(secs_var("TIMETABLE_REFRESH_SECS", 3600)?);
        let fetch_timeout = Duration::from_secs(secs_var("TIMETABLE_FETCH_TIMEOUT_SECS", 30)?);

        let change_kinds = match env::var("TIMETABLE_CHANGE_KINDS") {
            Ok(value) => ChangeKindPolicy::from_str(&value).ok_or_else(|| {
                ScheduleError::config(format!("Invalid TIMETABLE_CHANGE_KINDS: {}", value))
            })?,
            Err(_) => ChangeKindPolicy::default(),
        };

        Ok(Self {
            source_url,
            bind_addr,
            log_level,
            refresh_interval,
            fetch_timeout,
            change_kinds,
        })
    }
}

/// Read a positive number of seconds, falling back to `default` when unset.
fn secs_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ScheduleError::config(format!("Invalid {}: {}", name, raw))),
        },
        Err(_) => Ok(default),
    }
}
