//! CLI configuration management
//!
//! Loads settings from a TOML file, then applies `GREEKSCOPE_*` environment
//! overrides, then validates.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use adapter_feeds::{
    FeedConfig, SupportedAssets, DEFAULT_FEED_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "greekscope.toml";

const ENV_LOG_LEVEL: &str = "GREEKSCOPE_LOG_LEVEL";
const ENV_FEED_URL: &str = "GREEKSCOPE_FEED_URL";
const ENV_FEED_TIMEOUT: &str = "GREEKSCOPE_FEED_TIMEOUT_SECS";
const ENV_FEED_POLL: &str = "GREEKSCOPE_FEED_POLL_SECS";
const ENV_FEED_ASSETS: &str = "GREEKSCOPE_FEED_ASSETS";

/// Log levels accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::Config(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[feed]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSection {
    /// WebSocket endpoint
    pub url: String,
    /// Per-cycle deadline in seconds
    pub timeout_secs: u64,
    /// Seconds between poll cycles
    pub poll_interval_secs: u64,
    /// Assets allowed for live volatility
    pub supported_assets: Vec<String>,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            supported_assets: SupportedAssets::default().iter().map(str::to_string).collect(),
        }
    }
}

impl FeedSection {
    /// Feed client settings described by this section.
    pub fn to_feed_config(&self) -> FeedConfig {
        FeedConfig::default()
            .with_url(self.url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_supported_assets(SupportedAssets::new(&self.supported_assets))
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Volatility feed settings
    pub feed: FeedSection,
}

impl CliConfig {
    /// Resolve configuration from all sources
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (`path`, or `greekscope.toml` if present)
    /// 3. Default values
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load an explicitly named file, or the default file if it exists,
    /// or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `GREEKSCOPE_*` environment variables
    pub fn with_env_override(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(url) = lookup(ENV_FEED_URL) {
            self.feed.url = url;
        }
        if let Some(secs) = lookup(ENV_FEED_TIMEOUT) {
            self.feed.timeout_secs = parse_secs(ENV_FEED_TIMEOUT, &secs)?;
        }
        if let Some(secs) = lookup(ENV_FEED_POLL) {
            self.feed.poll_interval_secs = parse_secs(ENV_FEED_POLL, &secs)?;
        }
        if let Some(assets) = lookup(ENV_FEED_ASSETS) {
            self.feed.supported_assets = assets
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.feed.url.as_str();
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(CliError::Config(format!(
                "Invalid feed URL: {}. Must start with ws:// or wss://",
                url
            )));
        }
        if self.feed.timeout_secs == 0 {
            return Err(CliError::Config(
                "feed.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.feed.poll_interval_secs == 0 {
            return Err(CliError::Config(
                "feed.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.feed.supported_assets.iter().all(|s| s.trim().is_empty()) {
            return Err(CliError::Config(
                "feed.supported_assets must name at least one asset".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("{} must be a whole number of seconds, got {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.feed.url, "wss://www.deribit.com/ws/api/v2");
        assert_eq!(config.feed.timeout_secs, 5);
        assert_eq!(config.feed.poll_interval_secs, 30);
        assert_eq!(config.feed.supported_assets, vec!["BTC", "ETH"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            log_level = "DEBUG"

            [feed]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.feed.timeout_secs, 3);
        assert_eq!(config.feed.poll_interval_secs, 30);
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            CliConfig::from_toml_str("log_level = \"shout\""),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            CliConfig::from_toml_str("[feed\n"),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = CliConfig::load_or_default(Some(Path::new("/nonexistent/greekscope.toml")));
        assert!(matches!(err, Err(CliError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default()
            .with_overrides(env(&[
                ("GREEKSCOPE_LOG_LEVEL", "warn"),
                ("GREEKSCOPE_FEED_URL", "ws://localhost:9000"),
                ("GREEKSCOPE_FEED_TIMEOUT_SECS", "2"),
                ("GREEKSCOPE_FEED_POLL_SECS", "10"),
                ("GREEKSCOPE_FEED_ASSETS", "btc, sol,,"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.feed.url, "ws://localhost:9000");
        assert_eq!(config.feed.timeout_secs, 2);
        assert_eq!(config.feed.poll_interval_secs, 10);
        assert_eq!(config.feed.supported_assets, vec!["btc", "sol"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let result =
            CliConfig::default().with_overrides(env(&[("GREEKSCOPE_FEED_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = CliConfig::default();
        config.feed.url = "https://www.deribit.com".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.feed.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.feed.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.feed.supported_assets = vec![" ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_feed_section_to_feed_config() {
        let section = FeedSection {
            url: "ws://127.0.0.1:8080".to_string(),
            timeout_secs: 4,
            poll_interval_secs: 15,
            supported_assets: vec!["sol".to_string()],
        };
        let feed = section.to_feed_config();
        assert_eq!(feed.url, "ws://127.0.0.1:8080");
        assert_eq!(feed.timeout, Duration::from_secs(4));
        assert_eq!(feed.poll_interval, Duration::from_secs(15));
        assert!(feed.supported_assets.contains("SOL"));
        assert!(!feed.supported_assets.contains("BTC"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = CliConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("log_level = \"info\""));
        assert_eq!(CliConfig::from_toml_str(&text).unwrap(), config);
    }
}
