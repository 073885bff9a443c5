//! Runtime configuration for store and log locations.
//!
//! Resolution order per field: explicit override, then environment
//! (`BALANCE_DB_PATH`, `BALANCE_LOG_DIR`, `BALANCE_LOG_LEVEL`), then defaults
//! under the platform's local data directory. Blank values are ignored.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "BALANCE_DB_PATH";
pub const ENV_LOG_DIR: &str = "BALANCE_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "BALANCE_LOG_LEVEL";

const APP_DIR_NAME: &str = "balance";
const DB_FILE_NAME: &str = "balance.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Caller-supplied values that win over environment and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl PlannerConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves against an arbitrary variable lookup.
    pub fn resolve_with(overrides: ConfigOverrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let app_dir = default_app_dir();

        Self {
            db_path: overrides
                .db_path
                .or_else(|| env(ENV_DB_PATH).map(PathBuf::from))
                .unwrap_or_else(|| app_dir.join(DB_FILE_NAME)),
            log_dir: overrides
                .log_dir
                .or_else(|| env(ENV_LOG_DIR).map(PathBuf::from))
                .unwrap_or_else(|| app_dir.join(LOG_DIR_NAME)),
            log_level: overrides
                .log_level
                .or_else(|| env(ENV_LOG_LEVEL))
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

fn default_app_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ConfigOverrides, PlannerConfig, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_live_under_one_app_dir() {
        let config = PlannerConfig::resolve_with(ConfigOverrides::default(), lookup(&[]));
        assert!(config.db_path.ends_with("balance/balance.sqlite3"));
        assert!(config.log_dir.ends_with("balance/logs"));
        assert_eq!(config.db_path.parent(), config.log_dir.parent());
    }

    #[test]
    fn environment_beats_defaults_and_blank_is_ignored() {
        let config = PlannerConfig::resolve_with(
            ConfigOverrides::default(),
            lookup(&[(ENV_DB_PATH, "/tmp/planner.db"), (ENV_LOG_LEVEL, "  ")]),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/planner.db"));
        assert_eq!(config.log_level, crate::logging::default_log_level());
    }

    #[test]
    fn overrides_beat_environment() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/data/override.db")),
            log_level: Some("warn".to_string()),
            ..ConfigOverrides::default()
        };
        let config = PlannerConfig::resolve_with(
            overrides,
            lookup(&[(ENV_DB_PATH, "/tmp/env.db"), (ENV_LOG_LEVEL, "trace")]),
        );
        assert_eq!(config.db_path, PathBuf::from("/data/override.db"));
        assert_eq!(config.log_level, "warn");
    }
}
