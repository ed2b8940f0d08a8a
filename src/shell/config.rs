use crate::modules::attendance::use_cases::track_attendance::store::ReconcileStrategy;
use crate::shared::core::primitives::validate_date_format;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_EXPORT_DIR: &str = "./exports";
pub const DEFAULT_EXPORT_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const DEFAULT_AUDIT_LIMIT: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store_timeout: Duration,
    pub reconcile: ReconcileStrategy,
    pub export_dir: PathBuf,
    pub export_date_format: String,
    pub audit_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let bind_addr = parse("ATTENDANCE_BIND_ADDR", read("ATTENDANCE_BIND_ADDR", DEFAULT_BIND_ADDR))?;
        let timeout_ms: u64 = parse(
            "ATTENDANCE_STORE_TIMEOUT_MS",
            read("ATTENDANCE_STORE_TIMEOUT_MS", &DEFAULT_STORE_TIMEOUT_MS.to_string()),
        )?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "ATTENDANCE_STORE_TIMEOUT_MS",
                value: timeout_ms.to_string(),
                reason: "must be greater than zero".into(),
            });
        }
        let reconcile = parse(
            "ATTENDANCE_RECONCILE",
            read("ATTENDANCE_RECONCILE", "check-then-write"),
        )?;

        let export_date_format = read("ATTENDANCE_EXPORT_DATE_FORMAT", DEFAULT_EXPORT_DATE_FORMAT);
        if let Err(e) = validate_date_format(&export_date_format) {
            return Err(ConfigError::Invalid {
                key: "ATTENDANCE_EXPORT_DATE_FORMAT",
                value: export_date_format,
                reason: e.to_string(),
            });
        }

        let audit_limit = parse(
            "ATTENDANCE_AUDIT_LIMIT",
            read("ATTENDANCE_AUDIT_LIMIT", &DEFAULT_AUDIT_LIMIT.to_string()),
        )?;

        Ok(Self {
            bind_addr,
            store_timeout: Duration::from_millis(timeout_ms),
            reconcile,
            export_dir: PathBuf::from(read("ATTENDANCE_EXPORT_DIR", DEFAULT_EXPORT_DIR)),
            export_date_format,
            audit_limit,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            reconcile: ReconcileStrategy::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            export_date_format: DEFAULT_EXPORT_DATE_FORMAT.to_string(),
            audit_limit: DEFAULT_AUDIT_LIMIT,
        }
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
