//! Live-volatility mode for a single asset.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::client::VolatilityFeedClient;
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::poller::{PollerHandle, VolatilityPoller};
use crate::protocol::VolatilitySample;
use crate::transport::{FeedTransport, WsTransport};

/// Switches live volatility on and off and supplies the pricing input.
///
/// At most one asset is polled at a time; enabling another asset stops the
/// previous poller first.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use adapter_feeds::transport::ScriptedTransport;
/// use adapter_feeds::{FeedConfig, FeedError, LiveVolatility};
///
/// # tokio_test::block_on(async {
/// let mut live = LiveVolatility::new(Arc::new(ScriptedTransport::default()), FeedConfig::default());
///
/// let err = live.enable("DOGE").await.unwrap_err();
/// assert_eq!(err, FeedError::UnsupportedAsset("DOGE".into()));
/// assert!(!live.is_enabled());
///
/// // No live sample yet: the entered value is used
/// assert_eq!(live.current_volatility(0.65), 0.65);
/// # });
/// ```
pub struct LiveVolatility {
    transport: Arc<dyn FeedTransport>,
    config: FeedConfig,
    poller: Option<PollerHandle>,
}

impl LiveVolatility {
    /// Creates a controller with live mode off.
    pub fn new(transport: Arc<dyn FeedTransport>, config: FeedConfig) -> Self {
        Self {
            transport,
            config,
            poller: None,
        }
    }

    /// Creates a controller using a WebSocket transport to `config.url`.
    ///
    /// # Errors
    /// - `FeedError::Connect` if the URL is not a valid ws:// or wss:// URL
    pub fn websocket(config: FeedConfig) -> Result<Self, FeedError> {
        let transport = WsTransport::new(&config.url)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Starts polling `asset`, stopping any poller already running.
    ///
    /// # Errors
    /// - `FeedError::UnsupportedAsset` if the asset is not in the allow-list;
    ///   live mode is left off
    pub async fn enable(&mut self, asset: &str) -> Result<(), FeedError> {
        self.disable().await;
        let client = Arc::new(VolatilityFeedClient::new(
            Arc::clone(&self.transport),
            self.config.clone(),
        ));
        let handle = VolatilityPoller::spawn(client, asset)?;
        info!(asset = handle.asset(), "Live volatility enabled");
        self.poller = Some(handle);
        Ok(())
    }

    /// Stops polling and waits for the poller to exit.
    pub async fn disable(&mut self) {
        if let Some(handle) = self.poller.take() {
            let asset = handle.asset().to_string();
            handle.shutdown().await;
            info!(asset = %asset, "Live volatility disabled");
        }
    }

    /// Returns whether an asset is being polled.
    pub fn is_enabled(&self) -> bool {
        self.poller.is_some()
    }

    /// Asset being polled.
    pub fn asset(&self) -> Option<&str> {
        self.poller.as_ref().map(PollerHandle::asset)
    }

    /// Last live sample.
    pub fn latest(&self) -> Option<VolatilitySample> {
        self.poller.as_ref().and_then(PollerHandle::latest)
    }

    /// Receiver for new samples while live mode is on.
    pub fn subscribe(&self) -> Option<watch::Receiver<Option<VolatilitySample>>> {
        self.poller.as_ref().map(PollerHandle::subscribe)
    }

    /// Volatility input as a decimal: the live value when one is available,
    /// otherwise `fallback`.
    pub fn current_volatility(&self, fallback: f64) -> f64 {
        self.latest()
            .map(|sample| sample.as_decimal())
            .unwrap_or(fallback)
    }
}
