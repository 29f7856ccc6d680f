//! One-shot volatility request/response cycle.
//!
//! ```text
//! Idle → Connecting → AwaitingResponse → Resolved | Failed
//! ```
//!
//! A terminal state is kept until the next cycle starts from `Idle` again
//! (or until [`VolatilityFeedClient::reset`]). The connection is closed on
//! every exit path before the terminal state is published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::protocol::{self, VolatilitySample};
use crate::transport::{FeedConnection, FeedTransport, Frame, WsTransport};

/// Lifecycle state of a feed cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// No cycle in progress
    Idle,
    /// Opening the connection
    Connecting,
    /// Request sent, waiting for the response
    AwaitingResponse,
    /// Last cycle produced a sample
    Resolved(VolatilitySample),
    /// Last cycle failed
    Failed(FeedError),
}

impl FeedState {
    /// Short lowercase name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            FeedState::Idle => "idle",
            FeedState::Connecting => "connecting",
            FeedState::AwaitingResponse => "awaiting_response",
            FeedState::Resolved(_) => "resolved",
            FeedState::Failed(_) => "failed",
        }
    }

    /// Returns whether a cycle is in progress.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FeedState::Connecting | FeedState::AwaitingResponse)
    }
}

/// Runs volatility request/response cycles over a [`FeedTransport`].
///
/// Each call to [`fetch`](Self::fetch) opens one connection, sends exactly
/// one request and waits for the matching response under the configured
/// deadline. Calls on one client are expected to be sequential; the
/// [`VolatilityPoller`](crate::VolatilityPoller) guarantees that.
pub struct VolatilityFeedClient {
    transport: Arc<dyn FeedTransport>,
    config: FeedConfig,
    state: watch::Sender<FeedState>,
    next_id: AtomicU64,
}

impl VolatilityFeedClient {
    /// Creates an idle client.
    pub fn new(transport: Arc<dyn FeedTransport>, config: FeedConfig) -> Self {
        let (state, _) = watch::channel(FeedState::Idle);
        Self {
            transport,
            config,
            state,
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates an idle client talking WebSocket to `config.url`.
    ///
    /// # Errors
    /// - `FeedError::Connect` if the URL is not a valid ws:// or wss:// URL
    pub fn websocket(config: FeedConfig) -> Result<Self, FeedError> {
        let transport = WsTransport::new(&config.url)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Client configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Receiver observing state transitions.
    pub fn state(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Returns a terminal state to `Idle`.
    pub fn reset(&self) {
        if !self.state.borrow().is_in_flight() {
            self.transition(FeedState::Idle);
        }
    }

    /// Runs one cycle for `asset`.
    ///
    /// # Errors
    /// - `FeedError::UnsupportedAsset` before any connection is attempted
    /// - any other [`FeedError`] describing why the cycle failed
    pub async fn fetch(&self, asset: &str) -> Result<VolatilitySample, FeedError> {
        let (_never_cancelled, mut shutdown) = watch::channel(false);
        self.fetch_with_cancel(asset, &mut shutdown).await
    }

    /// Runs one cycle for `asset`, aborting when `shutdown` turns `true` or
    /// its sender is dropped.
    ///
    /// # Errors
    /// Same as [`fetch`](Self::fetch), plus `FeedError::Cancelled`.
    pub async fn fetch_with_cancel(
        &self,
        asset: &str,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<VolatilitySample, FeedError> {
        let symbol = self.config.supported_assets.resolve(asset)?;

        self.transition(FeedState::Idle);
        self.transition(FeedState::Connecting);

        let deadline = self.config.timeout;
        let mut connection: Option<Box<dyn FeedConnection>> = None;
        let outcome = tokio::select! {
            biased;
            _ = cancelled(shutdown) => Err(FeedError::Cancelled),
            result = timeout(deadline, self.exchange(&symbol, &mut connection)) => {
                result.unwrap_or(Err(FeedError::Timeout(deadline)))
            }
        };

        if let Some(mut open) = connection.take() {
            open.close().await;
        }

        match &outcome {
            Ok(sample) => {
                info!(asset = %symbol, volatility = sample.value, "Volatility sample received");
                self.transition(FeedState::Resolved(*sample));
            }
            Err(e) => {
                debug!(asset = %symbol, error = %e, "Volatility cycle failed");
                self.transition(FeedState::Failed(e.clone()));
            }
        }
        outcome
    }

    async fn exchange(
        &self,
        symbol: &str,
        slot: &mut Option<Box<dyn FeedConnection>>,
    ) -> Result<VolatilitySample, FeedError> {
        let connection = slot.insert(self.transport.connect().await?);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        connection
            .send_text(protocol::encode_request(id, symbol))
            .await?;
        self.transition(FeedState::AwaitingResponse);

        loop {
            match connection.next_frame().await? {
                Some(Frame::Text(text)) => {
                    if let Some(sample) = protocol::decode_response(&text, id)? {
                        return Ok(sample);
                    }
                    debug!(request_id = id, "Ignoring response to another request");
                }
                Some(_) => {}
                None => {
                    return Err(FeedError::Transport(
                        "connection closed by peer".to_string(),
                    ))
                }
            }
        }
    }

    fn transition(&self, next: FeedState) {
        debug!(
            from = self.state.borrow().name(),
            to = next.name(),
            "Feed state transition"
        );
        self.state.send_replace(next);
    }
}

/// Resolves once `shutdown` is `true` or its sender is gone.
pub(crate) async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
