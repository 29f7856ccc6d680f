//! Live volatility command implementation
//!
//! Polls the feed for one asset and prints every new sample until
//! interrupted or until the requested number of samples has been shown.

use std::future::Future;
use std::io::Write;

use adapter_feeds::{FeedConfig, LiveVolatility};
use tracing::{info, warn};

use crate::Result;

/// Run the live-vol command
pub async fn run(asset: &str, cycles: Option<usize>, feed: FeedConfig) -> Result<()> {
    let mut live = LiveVolatility::websocket(feed)?;
    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let mut stdout = std::io::stdout();
    let shown = stream_samples(&mut live, asset, cycles, &mut stdout, stop).await?;
    info!(samples = shown, "Live volatility stopped");
    Ok(())
}

/// Enables live mode for `asset` and writes each new sample to `out` until
/// `stop` completes or `cycles` samples have been written. Live mode is
/// always disabled before returning.
pub async fn stream_samples<W, F>(
    live: &mut LiveVolatility,
    asset: &str,
    cycles: Option<usize>,
    out: &mut W,
    stop: F,
) -> Result<usize>
where
    W: Write,
    F: Future<Output = ()>,
{
    live.enable(asset).await?;
    let Some(mut samples) = live.subscribe() else {
        return Ok(0);
    };
    let symbol = live.asset().unwrap_or(asset).to_string();
    tokio::pin!(stop);

    let mut shown = 0;
    let result = loop {
        if cycles.is_some_and(|limit| shown >= limit) {
            break Ok(shown);
        }
        tokio::select! {
            _ = &mut stop => break Ok(shown),
            changed = samples.changed() => {
                if changed.is_err() {
                    break Ok(shown);
                }
                let latest = *samples.borrow_and_update();
                if let Some(sample) = latest {
                    let line = writeln!(
                        out,
                        "{}  {}  {:.2}%",
                        sample.observed_at.format("%Y-%m-%d %H:%M:%S"),
                        symbol,
                        sample.value
                    );
                    if let Err(e) = line {
                        break Err(e.into());
                    }
                    shown += 1;
                }
            }
        }
    };

    live.disable().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_feeds::transport::{Frame, Script, ScriptedTransport};
    use adapter_feeds::FeedError;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::CliError;

    fn reply(id: u64, value: f64) -> Frame {
        Frame::text(format!(
            r#"{{"jsonrpc":"2.0","id":{id},"result":[[1700000000000,{value}]]}}"#
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_prints_requested_number_of_samples() {
        let transport = Arc::new(ScriptedTransport::new([
            Script::respond([reply(1, 48.125)]),
            Script::respond([reply(2, 49.5)]),
        ]));
        let mut live = LiveVolatility::new(transport.clone(), FeedConfig::default());
        let mut out = Vec::new();

        let shown = stream_samples(
            &mut live,
            "btc",
            Some(2),
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(shown, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("BTC  48.12%"));
        assert!(lines[1].ends_with("BTC  49.50%"));
        assert!(!live.is_enabled());
        assert!(transport.all_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_signal_ends_stream() {
        let transport = Arc::new(ScriptedTransport::new([Script::silent()]));
        let mut live = LiveVolatility::new(transport.clone(), FeedConfig::default());
        let mut out = Vec::new();

        let shown = stream_samples(
            &mut live,
            "ETH",
            None,
            &mut out,
            tokio::time::sleep(Duration::from_secs(2)),
        )
        .await
        .unwrap();

        assert_eq!(shown, 0);
        assert!(out.is_empty());
        assert!(transport.all_closed());
    }

    #[tokio::test]
    async fn test_unsupported_asset() {
        let mut live = LiveVolatility::new(
            Arc::new(ScriptedTransport::default()),
            FeedConfig::default(),
        );
        let mut out = Vec::new();

        let err = stream_samples(&mut live, "DOGE", None, &mut out, std::future::pending())
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Feed(FeedError::UnsupportedAsset(_))));
    }
}
