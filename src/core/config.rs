use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

use crate::providers::alpha_vantage::DEFAULT_BASE_URL;

/// Environment variable holding the Alpha Vantage credential.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

pub const DEFAULT_PAIRS: [&str; 5] = ["EUR/USD", "USD/JPY", "GBP/USD", "USD/CHF", "AUD/USD"];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AlphaVantageProviderConfig {
    pub base_url: String,
}

impl Default for AlphaVantageProviderConfig {
    fn default() -> Self {
        AlphaVantageProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub alpha_vantage: AlphaVantageProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_delay_ms() -> u64 {
    200
}

fn default_pairs() -> Vec<String> {
    DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_pairs")]
    pub default_pairs: Vec<String>,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            request_timeout_secs: default_timeout_secs(),
            request_delay_ms: default_delay_ms(),
            default_pairs: default_pairs(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Loads from an explicit path when given, otherwise the default location.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "fxscan", "fxscan")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Reads the credential once. An empty value counts as unset.
    pub fn api_key_from_env() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.request_delay(), Duration::from_millis(200));
        assert_eq!(
            config.default_pairs,
            vec!["EUR/USD", "USD/JPY", "GBP/USD", "USD/CHF", "AUD/USD"]
        );
        assert_eq!(
            config.providers.alpha_vantage.base_url,
            "https://www.alphavantage.co"
        );
        assert_eq!(config.server.listen_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  alpha_vantage:
    base_url: "http://example.com/av"
request_timeout_secs: 3
request_delay_ms: 0
default_pairs:
  - "EUR/GBP"
server:
  listen_addr: "0.0.0.0:8080"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.alpha_vantage.base_url, "http://example.com/av");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.default_pairs, vec!["EUR/GBP"]);
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("config.yaml");
        fs::write(&path, "request_delay_ms: 50\n")?;

        let config = AppConfig::load_or_default(path.to_str())?;
        assert_eq!(config.request_delay_ms, 50);
        assert_eq!(config.request_timeout_secs, 10);
        Ok(())
    }
}
