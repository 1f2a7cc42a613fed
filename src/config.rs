use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "PharmAssist";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address for the JSON API.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8088";
/// NLM RxNav (normalization + interactions).
pub const DEFAULT_RXNAV_URL: &str = "https://rxnav.nlm.nih.gov";
/// openFDA (drug labels).
pub const DEFAULT_OPENFDA_URL: &str = "https://api.fda.gov";
/// Upper bound on any single outbound request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Autocomplete list length.
pub const SUGGESTION_LIMIT: usize = 8;
/// How many drug names to offer when a drug search misses.
pub const AVAILABLE_DRUGS_HINT: usize = 10;
/// Largest regimen accepted for a single check.
pub const MAX_REGIMEN_DRUGS: usize = 20;
/// Name resolutions in flight at once per request.
pub const RESOLVE_CONCURRENCY: usize = 4;
/// Distinct suggestion queries kept in memory.
pub const SUGGESTION_CACHE_CAPACITY: usize = 1024;

const ENV_SOURCE: &str = "PHARMASSIST_SOURCE";
const ENV_BIND: &str = "PHARMASSIST_BIND";
const ENV_RESOURCES_DIR: &str = "PHARMASSIST_RESOURCES_DIR";
const ENV_RXNAV_URL: &str = "PHARMASSIST_RXNAV_URL";
const ENV_OPENFDA_URL: &str = "PHARMASSIST_OPENFDA_URL";
const ENV_HTTP_TIMEOUT: &str = "PHARMASSIST_HTTP_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "pharmassist_lib=info,pharmassist=info,tower_http=warn"
}

/// Where drug and interaction data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Bundled reference dataset, no network.
    Local,
    /// RxNav + openFDA.
    Remote,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(ConfigError::Invalid {
                var: ENV_SOURCE,
                value: other.to_string(),
                reason: "expected \"local\" or \"remote\"".into(),
            }),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var} ({value:?}): {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceKind,
    pub bind_addr: SocketAddr,
    /// Overrides the bundled JSON resources when set.
    pub resources_dir: Option<PathBuf>,
    pub rxnav_url: String,
    pub openfda_url: String,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Local,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8088)),
            resources_dir: None,
            rxnav_url: DEFAULT_RXNAV_URL.to_string(),
            openfda_url: DEFAULT_OPENFDA_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_SOURCE) {
            config.source = value.parse()?;
        }

        if let Some(value) = get(ENV_BIND) {
            config.bind_addr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: ENV_BIND,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        config.resources_dir = get(ENV_RESOURCES_DIR).map(PathBuf::from);

        if let Some(value) = get(ENV_RXNAV_URL) {
            config.rxnav_url = value.trim().to_string();
        }
        if let Some(value) = get(ENV_OPENFDA_URL) {
            config.openfda_url = value.trim().to_string();
        }

        if let Some(value) = get(ENV_HTTP_TIMEOUT) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: ENV_HTTP_TIMEOUT,
                value: value.clone(),
                reason: "expected a whole number of seconds".into(),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: ENV_HTTP_TIMEOUT,
                    value,
                    reason: "timeout must be at least 1 second".into(),
                });
            }
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_empty() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.source, SourceKind::Local);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.rxnav_url, DEFAULT_RXNAV_URL);
        assert_eq!(config.openfda_url, DEFAULT_OPENFDA_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.resources_dir.is_none());
    }

    #[test]
    fn reads_all_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PHARMASSIST_SOURCE", "Remote"),
            ("PHARMASSIST_BIND", "0.0.0.0:9000"),
            ("PHARMASSIST_RESOURCES_DIR", "/opt/pharmassist/data"),
            ("PHARMASSIST_RXNAV_URL", "http://localhost:4000"),
            ("PHARMASSIST_OPENFDA_URL", "http://localhost:4001"),
            ("PHARMASSIST_HTTP_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(
            config.resources_dir,
            Some(PathBuf::from("/opt/pharmassist/data"))
        );
        assert_eq!(config.rxnav_url, "http://localhost:4000");
        assert_eq!(config.openfda_url, "http://localhost:4001");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("PHARMASSIST_SOURCE", "  ")])).unwrap();
        assert_eq!(config.source, SourceKind::Local);
    }

    #[test]
    fn rejects_unknown_source() {
        let err = AppConfig::from_lookup(lookup_from(&[("PHARMASSIST_SOURCE", "cloud")]))
            .unwrap_err();
        assert!(err.to_string().contains("PHARMASSIST_SOURCE"));
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(
            AppConfig::from_lookup(lookup_from(&[("PHARMASSIST_BIND", "localhost")])).is_err()
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let err =
            AppConfig::from_lookup(lookup_from(&[("PHARMASSIST_HTTP_TIMEOUT_SECS", "0")]))
                .unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
    }

    #[test]
    fn app_name_is_pharmassist() {
        assert_eq!(APP_NAME, "PharmAssist");
    }
}
