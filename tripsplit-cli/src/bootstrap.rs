use std::{env, path::PathBuf};
use tracing_subscriber::EnvFilter;
use tripsplit_domain::DEFAULT_TRIP_DURATION;

const DATA_DIR_VAR: &str = "TRIPSPLIT_DATA_DIR";
const DEFAULT_DURATION_VAR: &str = "TRIPSPLIT_DEFAULT_DURATION";
const DEFAULT_DATA_DIR: &str = "./trips";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("TRIPSPLIT_DEFAULT_DURATION must be a positive number of days (got '{0}')")]
    InvalidDefaultDuration(String),
}

/// Runtime settings read from the environment and an optional `.env` file
#[derive(Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub default_trip_duration: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let default_trip_duration = match lookup(DEFAULT_DURATION_VAR) {
            None => DEFAULT_TRIP_DURATION,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => return Err(ConfigError::InvalidDefaultDuration(raw)),
            },
        };

        Ok(Self {
            data_dir,
            default_trip_duration,
        })
    }
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides the
/// default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(
            config_from(&[]),
            Ok(AppConfig {
                data_dir: PathBuf::from("./trips"),
                default_trip_duration: 3,
            })
        );
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("TRIPSPLIT_DATA_DIR", "/var/lib/tripsplit"),
            ("TRIPSPLIT_DEFAULT_DURATION", " 5 "),
        ])
        .expect("config");

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/tripsplit"));
        assert_eq!(config.default_trip_duration, 5);
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-2")]
    #[case::text("three")]
    fn rejects_invalid_default_duration(#[case] raw: &str) {
        assert_eq!(
            config_from(&[("TRIPSPLIT_DEFAULT_DURATION", raw)]),
            Err(ConfigError::InvalidDefaultDuration(raw.to_owned()))
        );
    }
}
