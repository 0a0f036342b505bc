use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:9200";
pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,latlng,capital,region,subregion,population,languages,flag,currencies,timezones";
pub const DEFAULT_BORDERS_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

/// Timeout and retry settings shared by every outbound fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchPolicy {
    pub timeout: Duration,
    /// Extra attempts after the first one.
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub countries_url: String,
    pub borders_url: String,
    pub fetch: FetchPolicy,
    /// Seed for the fallback generator; `None` draws from entropy.
    pub fallback_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddr { value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddr { value, reason } => {
                write!(f, "invalid GLOBE_ADDR {value:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unparseable numeric
    /// values fall back to their defaults; only the listen address is fatal.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_text = lookup("GLOBE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidAddr {
                value: addr_text.clone(),
                reason: e.to_string(),
            })?;

        let defaults = FetchPolicy::default();
        let fetch = FetchPolicy {
            timeout: Duration::from_secs(env_var_u64(
                &lookup,
                "FETCH_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
            retries: env_var_u32(&lookup, "FETCH_RETRIES", defaults.retries),
            backoff: Duration::from_millis(env_var_u64(
                &lookup,
                "FETCH_BACKOFF_MS",
                defaults.backoff.as_millis() as u64,
            )),
        };

        Ok(Self {
            addr,
            countries_url: lookup("COUNTRIES_URL")
                .unwrap_or_else(|| DEFAULT_COUNTRIES_URL.to_string()),
            borders_url: lookup("BORDERS_URL").unwrap_or_else(|| DEFAULT_BORDERS_URL.to_string()),
            fetch,
            fallback_seed: lookup("FALLBACK_SEED").and_then(|v| v.trim().parse().ok()),
        })
    }
}

fn env_var_u32<F>(lookup: &F, key: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_var_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).expect("config");
        assert_eq!(cfg.addr, "127.0.0.1:9200".parse().expect("addr"));
        assert_eq!(cfg.countries_url, DEFAULT_COUNTRIES_URL);
        assert_eq!(cfg.borders_url, DEFAULT_BORDERS_URL);
        assert_eq!(cfg.fetch, FetchPolicy::default());
        assert_eq!(cfg.fetch.timeout, Duration::from_secs(15));
        assert_eq!(cfg.fallback_seed, None);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("GLOBE_ADDR", "0.0.0.0:8080"),
            ("FETCH_RETRIES", "5"),
            ("FETCH_BACKOFF_MS", "50"),
            ("FETCH_TIMEOUT_SECS", "3"),
            ("FALLBACK_SEED", "42"),
            ("BORDERS_URL", "http://localhost/borders.geojson"),
        ])
        .expect("config");
        assert_eq!(cfg.addr.port(), 8080);
        assert_eq!(cfg.fetch.retries, 5);
        assert_eq!(cfg.fetch.backoff, Duration::from_millis(50));
        assert_eq!(cfg.fetch.timeout, Duration::from_secs(3));
        assert_eq!(cfg.fallback_seed, Some(42));
        assert_eq!(cfg.borders_url, "http://localhost/borders.geojson");
    }

    #[test]
    fn garbage_numbers_use_defaults() {
        let cfg = config(&[("FETCH_RETRIES", "lots"), ("FALLBACK_SEED", "-")]).expect("config");
        assert_eq!(cfg.fetch.retries, 2);
        assert_eq!(cfg.fallback_seed, None);
    }

    #[test]
    fn bad_addr_is_an_error() {
        let err = config(&[("GLOBE_ADDR", "not an addr")]).expect_err("should fail");
        assert!(err.to_string().contains("GLOBE_ADDR"));
    }
}
