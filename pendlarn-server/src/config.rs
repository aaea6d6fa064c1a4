//! Process configuration, read once at startup.

use crate::trafikverket::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TrafikverketConfig};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors in the process environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for the whole process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Trafikverket API key (`TRAFIKVERKET_API_KEY`, required)
    pub api_key: String,
    /// Listen port (`PORT`, default 3000)
    pub port: u16,
    /// Upstream endpoint (`TRAFIKVERKET_API_URL`)
    pub api_url: String,
    /// Per-call upstream timeout (`TRAFIKVERKET_TIMEOUT_SECS`, default 30)
    pub timeout_secs: u64,
    /// Directory served under `/static` (`PENDLARN_STATIC_DIR`)
    pub static_dir: String,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`. Unset and empty variables
    /// are treated alike.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key =
            get("TRAFIKVERKET_API_KEY").ok_or(ConfigError::Missing("TRAFIKVERKET_API_KEY"))?;

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("TRAFIKVERKET_TIMEOUT_SECS") {
            Some(value) => match value.parse() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "TRAFIKVERKET_TIMEOUT_SECS",
                        value,
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            port,
            api_url: get("TRAFIKVERKET_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs,
            static_dir: get("PENDLARN_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    /// Settings for the upstream client.
    pub fn trafikverket(&self) -> TrafikverketConfig {
        TrafikverketConfig::new(&self.api_key)
            .with_base_url(&self.api_url)
            .with_timeout(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[("TRAFIKVERKET_API_KEY", "abc")]).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn missing_api_key() {
        assert_eq!(
            from_vars(&[("PORT", "8080")]),
            Err(ConfigError::Missing("TRAFIKVERKET_API_KEY"))
        );
        assert_eq!(
            from_vars(&[("TRAFIKVERKET_API_KEY", "")]),
            Err(ConfigError::Missing("TRAFIKVERKET_API_KEY"))
        );
    }

    #[test]
    fn empty_port_means_default() {
        let config = from_vars(&[("TRAFIKVERKET_API_KEY", "abc"), ("PORT", "")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn overrides() {
        let config = from_vars(&[
            ("TRAFIKVERKET_API_KEY", "abc"),
            ("PORT", "8080"),
            ("TRAFIKVERKET_API_URL", "http://localhost:9999"),
            ("TRAFIKVERKET_TIMEOUT_SECS", "5"),
            ("PENDLARN_STATIC_DIR", "/srv/static"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, "/srv/static");

        let upstream = config.trafikverket();
        assert_eq!(upstream.api_key, "abc");
        assert_eq!(upstream.base_url, "http://localhost:9999");
        assert_eq!(upstream.timeout_secs, 5);
    }

    #[test]
    fn invalid_values() {
        let err = from_vars(&[("TRAFIKVERKET_API_KEY", "abc"), ("PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid PORT: \"http\"");

        let err = from_vars(&[
            ("TRAFIKVERKET_API_KEY", "abc"),
            ("TRAFIKVERKET_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "TRAFIKVERKET_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
