//! # adapter_feeds: Live Volatility Feed
//!
//! ## Adapter Layer Role
//!
//! adapter_feeds is the only asynchronous part of the workspace. It pulls a
//! historical-volatility series for one asset from a JSON-RPC endpoint over
//! a persistent connection and turns the newest observation into a
//! [`VolatilitySample`] that can replace the user-entered volatility.
//!
//! ## Components
//!
//! - [`VolatilityFeedClient`]: one request/response cycle per call, driven
//!   through [`FeedState`] with a hard deadline and optional cancellation
//! - [`VolatilityPoller`]: runs the cycle immediately and then on a fixed
//!   period, publishing the latest good sample
//! - [`LiveVolatility`]: enables and disables polling for one asset and
//!   supplies the volatility input with a fallback
//! - [`SupportedAssets`]: the allow-list of pollable assets
//! - [`transport`]: the connection seam, with a WebSocket implementation
//!   and a scripted in-memory one
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use adapter_feeds::transport::{Frame, Script, ScriptedTransport};
//! use adapter_feeds::{FeedConfig, FeedState, VolatilityFeedClient};
//!
//! # tokio_test::block_on(async {
//! let reply = r#"{"jsonrpc":"2.0","id":1,"result":[[1700000000000,52.1],[1700003600000,54.789]]}"#;
//! let transport = ScriptedTransport::new([Script::respond([Frame::text(reply)])]);
//! let client = VolatilityFeedClient::new(Arc::new(transport), FeedConfig::default());
//!
//! let sample = client.fetch("BTC").await.unwrap();
//! assert_eq!(sample.value, 54.78);
//! assert!(matches!(*client.state().borrow(), FeedState::Resolved(_)));
//! # });
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod assets;
mod client;
mod config;
mod error;
mod live;
mod poller;
pub mod protocol;
pub mod transport;

pub use assets::SupportedAssets;
pub use client::{FeedState, VolatilityFeedClient};
pub use config::{FeedConfig, DEFAULT_FEED_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
pub use error::FeedError;
pub use live::LiveVolatility;
pub use poller::{PollerHandle, VolatilityPoller};
pub use protocol::VolatilitySample;
