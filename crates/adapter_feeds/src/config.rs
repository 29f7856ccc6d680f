//! Feed client configuration.

use std::time::Duration;

use crate::assets::SupportedAssets;

/// Default JSON-RPC WebSocket endpoint.
pub const DEFAULT_FEED_URL: &str = "wss://www.deribit.com/ws/api/v2";

/// Default deadline for one request/response cycle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default period between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Settings shared by the feed client and poller.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use adapter_feeds::{FeedConfig, SupportedAssets};
///
/// let config = FeedConfig::default()
///     .with_timeout(Duration::from_secs(2))
///     .with_supported_assets(SupportedAssets::new(["BTC"]));
/// assert_eq!(config.timeout, Duration::from_secs(2));
/// assert_eq!(config.poll_interval, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// WebSocket endpoint URL (ws:// or wss://)
    pub url: String,
    /// Deadline covering connect, request and response
    pub timeout: Duration,
    /// Period between poll cycles
    pub poll_interval: Duration,
    /// Assets that may be polled
    pub supported_assets: SupportedAssets,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            supported_assets: SupportedAssets::default(),
        }
    }
}

impl FeedConfig {
    /// Replaces the endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Replaces the cycle deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the poll period.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Replaces the asset allow-list.
    pub fn with_supported_assets(mut self, supported_assets: SupportedAssets) -> Self {
        self.supported_assets = supported_assets;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.url, "wss://www.deribit.com/ws/api/v2");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert!(config.supported_assets.contains("ETH"));
    }

    #[test]
    fn test_builders() {
        let config = FeedConfig::default()
            .with_url("ws://localhost:9000")
            .with_poll_interval(Duration::from_secs(1));
        assert_eq!(config.url, "ws://localhost:9000");
        assert_eq!(config.poll_interval, Duration::from_secs(1));
    }
}
