//! Periodic volatility refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::client::{cancelled, VolatilityFeedClient};
use crate::error::FeedError;
use crate::protocol::VolatilitySample;

// tokio's interval rejects a zero period
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns background tasks that refresh one asset's volatility.
pub struct VolatilityPoller;

impl VolatilityPoller {
    /// Starts polling `asset`: one cycle immediately, then one per
    /// `poll_interval`. Missed ticks are skipped, so at most one request is
    /// ever outstanding.
    ///
    /// Resolved samples replace the published value. Failed cycles keep
    /// the previous value and are logged as warnings.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - `FeedError::UnsupportedAsset` if the asset is not in the client's
    ///   allow-list; no task is spawned
    pub fn spawn(
        client: Arc<VolatilityFeedClient>,
        asset: &str,
    ) -> Result<PollerHandle, FeedError> {
        let symbol = client.config().supported_assets.resolve(asset)?;
        let (latest_tx, latest_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(poll_loop(client, symbol.clone(), latest_tx, shutdown_rx));

        Ok(PollerHandle {
            asset: symbol,
            latest: latest_rx,
            shutdown: shutdown_tx,
            task: Some(task),
        })
    }
}

async fn poll_loop(
    client: Arc<VolatilityFeedClient>,
    symbol: String,
    latest: watch::Sender<Option<VolatilitySample>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let period = client.config().poll_interval.max(MIN_POLL_INTERVAL);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(asset = %symbol, period_secs = period.as_secs_f64(), "Volatility poller started");

    loop {
        tokio::select! {
            biased;
            _ = cancelled(&mut shutdown) => break,
            _ = ticker.tick() => {}
        }

        match client.fetch_with_cancel(&symbol, &mut shutdown).await {
            Ok(sample) => {
                latest.send_replace(Some(sample));
            }
            Err(FeedError::Cancelled) => break,
            Err(e) => {
                warn!(
                    asset = %symbol,
                    error = %e,
                    recoverable = e.is_recoverable(),
                    "Volatility refresh failed; keeping previous value"
                );
            }
        }
    }

    client.reset();
    info!(asset = %symbol, "Volatility poller stopped");
}

/// Owner of a running poller.
///
/// Dropping the handle signals cancellation without waiting;
/// [`shutdown`](Self::shutdown) also waits for the task to finish.
pub struct PollerHandle {
    asset: String,
    latest: watch::Receiver<Option<VolatilitySample>>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Canonical symbol being polled.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Last resolved sample, if any cycle has succeeded.
    pub fn latest(&self) -> Option<VolatilitySample> {
        *self.latest.borrow()
    }

    /// Receiver notified on every new sample.
    pub fn subscribe(&self) -> watch::Receiver<Option<VolatilitySample>> {
        self.latest.clone()
    }

    /// Returns whether the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancels polling and waits for the task to exit. Any in-flight cycle
    /// is aborted and its connection closed; nothing is published after
    /// this returns.
    pub async fn shutdown(mut self) {
        self.shutdown.send_replace(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(asset = %self.asset, error = %e, "Volatility poller task ended abnormally");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

impl std::fmt::Debug for PollerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollerHandle")
            .field("asset", &self.asset)
            .field("latest", &self.latest())
            .field("finished", &self.is_finished())
            .finish()
    }
}
