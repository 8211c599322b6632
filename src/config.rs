//! User configuration, read from `~/.swipevote/config.yaml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_LOG_FILE, FETCH_DATA_TIMEOUT};
use crate::models::Network;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain gateway URL, `file://` URL or path to a `.json` snapshot
    pub endpoint: String,
    /// Forces the network instead of guessing it from the endpoint
    pub network: Option<Network>,
    pub fetch_timeout_ms: u64,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: String::from(DEFAULT_ENDPOINT),
            network: None,
            fetch_timeout_ms: FETCH_DATA_TIMEOUT.as_millis() as u64,
            log_file: String::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".swipevote")
    }

    /// Load from the default location; a missing file gives the defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir().join("config.yaml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply command line overrides: the first argument is the endpoint
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(endpoint) = args.into_iter().next() {
            self.endpoint = endpoint.into();
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Configured network, else whatever the endpoint suggests
    pub fn resolved_network(&self) -> Option<Network> {
        self.network.or_else(|| Network::detect(&self.endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fetch_timeout(), Duration::from_millis(15000));
    }

    #[test]
    fn test_partial_file() {
        let yaml = r#"
endpoint: https://gateway.example/kusama
fetch_timeout_ms: 2000
"#;
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, yaml).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint, "https://gateway.example/kusama");
        assert_eq!(config.fetch_timeout_ms, 2000);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.resolved_network(), Some(Network::Kusama));
    }

    #[test]
    fn test_explicit_network_wins() {
        let config = Config::from_yaml_str("endpoint: http://kusama.local\nnetwork: westend\n").unwrap();
        assert_eq!(config.resolved_network(), Some(Network::Westend));
    }

    #[test]
    fn test_bad_yaml_is_an_error() {
        assert!(Config::from_yaml_str("network: mars\n").is_err());
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_args_override_endpoint() {
        let config = Config::default().with_args(vec!["snapshots/polkadot.json"]);
        assert_eq!(config.endpoint, "snapshots/polkadot.json");
        assert_eq!(config.resolved_network(), Some(Network::Polkadot));
        let untouched = Config::default().with_args(Vec::<String>::new());
        assert_eq!(untouched.endpoint, DEFAULT_ENDPOINT);
    }
}
