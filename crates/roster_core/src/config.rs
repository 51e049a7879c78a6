//! Runtime configuration for the composition root.
//!
//! # Responsibility
//! - Resolve database, logging and dashboard settings from the environment.
//!
//! # Invariants
//! - Missing values fall back to defaults; malformed values are errors.

use crate::logging::default_log_level;
use crate::service::dashboard::DEFAULT_TOP_PLAYERS;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";
pub const ENV_TOP_PLAYERS: &str = "ROSTER_TOP_PLAYERS";

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` must be a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings consumed by [`crate::app::Roster::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// SQLite file; `None` keeps the store in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Rolling log directory; `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
    pub dashboard_top_players: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            dashboard_top_players: DEFAULT_TOP_PLAYERS,
        }
    }
}

impl RosterConfig {
    /// Reads `ROSTER_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let dashboard_top_players = match read(ENV_TOP_PLAYERS) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                key: ENV_TOP_PLAYERS,
                value,
            })?,
            None => defaults.dashboard_top_players,
        };

        Ok(Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
            dashboard_top_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RosterConfig, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_TOP_PLAYERS};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = RosterConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RosterConfig::default());
        assert!(config.db_path.is_none());
        assert_eq!(config.dashboard_top_players, 5);
    }

    #[test]
    fn values_are_trimmed_and_blank_means_unset() {
        let config = RosterConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " /tmp/roster.db "),
            (ENV_LOG_LEVEL, "  "),
            (ENV_TOP_PLAYERS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/roster.db")));
        assert_eq!(config.log_level, RosterConfig::default().log_level);
        assert_eq!(config.dashboard_top_players, 3);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = RosterConfig::from_lookup(lookup(&[(ENV_TOP_PLAYERS, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { value, .. } if value == "-1"));
    }
}
