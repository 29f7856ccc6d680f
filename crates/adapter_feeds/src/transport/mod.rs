//! Connection seam between the feed client and the network.
//!
//! This module provides:
//! - [`FeedTransport`]: opens connections
//! - [`FeedConnection`]: one open connection exchanging text frames
//! - [`WsTransport`]: WebSocket implementation on `tokio-tungstenite`
//! - [`ScriptedTransport`]: in-memory implementation replaying scripted frames

mod scripted;
mod ws;

pub use scripted::{Script, ScriptedTransport};
pub use ws::{WsTransport, CLOSE_TIMEOUT};

use async_trait::async_trait;

use crate::error::FeedError;

/// A frame received from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text payload
    Text(String),
    /// Binary payload
    Binary(Vec<u8>),
    /// Ping control frame
    Ping,
    /// Pong control frame
    Pong,
}

impl Frame {
    /// Text frame from anything string-like.
    pub fn text(payload: impl Into<String>) -> Self {
        Frame::Text(payload.into())
    }
}

/// Factory for feed connections.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Opens a new connection.
    ///
    /// # Errors
    /// - `FeedError::Connect` if the endpoint cannot be reached
    async fn connect(&self) -> Result<Box<dyn FeedConnection>, FeedError>;
}

/// One open connection.
///
/// `close` must be idempotent and must leave `is_closed` returning `true`
/// even if the closing handshake itself fails.
#[async_trait]
pub trait FeedConnection: Send {
    /// Sends a text frame.
    async fn send_text(&mut self, text: String) -> Result<(), FeedError>;

    /// Waits for the next frame; `Ok(None)` when the peer closed.
    async fn next_frame(&mut self) -> Result<Option<Frame>, FeedError>;

    /// Closes the connection.
    async fn close(&mut self);

    /// Returns whether the connection is closed.
    fn is_closed(&self) -> bool;
}
