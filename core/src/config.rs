//! Client configuration.
//!
//! Defaults point at the public production APIs. `from_env` lets a
//! deployment (or a test run against the mock server) redirect either
//! provider and change the timeout without code changes.

use std::time::Duration;

use crate::error::ApiError;

pub const DEXSCREENER_URL: &str = "https://api.dexscreener.com";
pub const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_DEXSCREENER_URL: &str = "MARKETFEED_DEXSCREENER_URL";
pub const ENV_COINGECKO_URL: &str = "MARKETFEED_COINGECKO_URL";
pub const ENV_TIMEOUT_SECS: &str = "MARKETFEED_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub dexscreener_url: String,
    pub coingecko_url: String,
    /// Budget for one whole call; there is no per-phase split.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dexscreener_url: DEXSCREENER_URL.to_string(),
            coingecko_url: COINGECKO_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("marketfeed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `MARKETFEED_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_DEXSCREENER_URL) {
            config.dexscreener_url = url;
        }
        if let Some(url) = lookup(ENV_COINGECKO_URL) {
            config.coingecko_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{ENV_TIMEOUT_SECS}: `{raw}` is not a whole number of seconds")))?;
            if secs == 0 {
                return Err(ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be positive")));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Both providers at one origin, the way the mock server serves them.
    pub fn local(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            dexscreener_url: origin.to_string(),
            coingecko_url: format!("{origin}/api/v3"),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ErrorKind;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_target_production() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.coingecko_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("marketfeed/"));
    }

    #[test]
    fn env_overrides_urls_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_DEXSCREENER_URL, "http://127.0.0.1:9000"),
            (ENV_TIMEOUT_SECS, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.dexscreener_url, "http://127.0.0.1:9000");
        assert_eq!(config.coingecko_url, COINGECKO_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_config_error() {
        for raw in ["soon", "0", "-3"] {
            let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, raw)])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{raw}");
        }
    }

    #[test]
    fn local_serves_both_providers_from_one_origin() {
        let config = ClientConfig::local("http://127.0.0.1:3000/");
        assert_eq!(config.dexscreener_url, "http://127.0.0.1:3000");
        assert_eq!(config.coingecko_url, "http://127.0.0.1:3000/api/v3");
    }
}
