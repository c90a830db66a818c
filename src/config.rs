//! Runtime configuration.
//!
//! Every setting resolves flag > environment variable > default.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;
use url::Url;

use crate::cli::default_data_dir;
use crate::storage::DEFAULT_QUOTA_BYTES;

pub const DATA_DIR_ENV: &str = "PANTRY_HOME";
pub const API_URL_ENV: &str = "PANTRY_API_URL";
pub const TIMEOUT_ENV: &str = "PANTRY_TIMEOUT_SECS";
pub const QUOTA_ENV: &str = "PANTRY_STORAGE_QUOTA";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding session.json and every stored record
    pub data_dir: PathBuf,
    /// Base URL of the recipe backend
    pub api_url: Url,
    pub timeout_secs: u64,
    pub quota_bytes: u64,
}

impl Config {
    /// Resolve configuration from CLI flags and the process environment.
    pub fn resolve(data_dir: Option<String>, api_url: Option<String>) -> Result<Self> {
        Self::resolve_with(data_dir, api_url, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with(
        data_dir: Option<String>,
        api_url: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let data_dir = match data_dir.or_else(|| non_empty(DATA_DIR_ENV)) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let raw_url = api_url
            .or_else(|| non_empty(API_URL_ENV))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_base_url(&raw_url)?;

        let timeout_secs = match non_empty(TIMEOUT_ENV) {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", TIMEOUT_ENV, v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let quota_bytes = match non_empty(QUOTA_ENV) {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", QUOTA_ENV, v))?,
            None => DEFAULT_QUOTA_BYTES,
        };

        let config = Self {
            data_dir,
            api_url,
            timeout_secs,
            quota_bytes,
        };
        debug!("Resolved config: {:?}", config);
        Ok(config)
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep the path.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&with_slash).with_context(|| format!("Invalid API URL: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve_with(Some("/tmp/pantry".into()), None, env_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pantry"));
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = env_from(&[
            (DATA_DIR_ENV, "/srv/pantry"),
            (API_URL_ENV, "https://recipes.example.com/api"),
            (TIMEOUT_ENV, "5"),
            (QUOTA_ENV, "1024"),
        ]);
        let config = Config::resolve_with(None, None, env).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/pantry"));
        assert_eq!(config.api_url.as_str(), "https://recipes.example.com/api/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.quota_bytes, 1024);
    }

    #[test]
    fn test_flags_override_env() {
        let env = env_from(&[(DATA_DIR_ENV, "/srv/pantry"), (API_URL_ENV, "https://a.example")]);
        let config = Config::resolve_with(
            Some("/home/me/.pantry".into()),
            Some("https://b.example/".into()),
            env,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/me/.pantry"));
        assert_eq!(config.api_url.host_str(), Some("b.example"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::resolve_with(Some("/tmp".into()), Some("not a url".into()), env_from(&[])).is_err());
        assert!(
            Config::resolve_with(Some("/tmp".into()), None, env_from(&[(TIMEOUT_ENV, "soon")]))
                .is_err()
        );
    }
}
