//! WebSocket transport.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;
use url::Url;

use super::{FeedConnection, FeedTransport, Frame};
use crate::error::FeedError;

/// Bound on the close handshake; the socket is dropped once it elapses.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Opens WebSocket connections to a fixed endpoint.
///
/// # Examples
/// ```
/// use adapter_feeds::transport::WsTransport;
///
/// let transport = WsTransport::new("wss://www.deribit.com/ws/api/v2").unwrap();
/// assert_eq!(transport.url().host_str(), Some("www.deribit.com"));
///
/// assert!(WsTransport::new("https://www.deribit.com").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WsTransport {
    url: Url,
}

impl WsTransport {
    /// Creates a transport for a `ws://` or `wss://` URL.
    ///
    /// # Errors
    /// - `FeedError::Connect` if the URL does not parse or has another scheme
    pub fn new(url: &str) -> Result<Self, FeedError> {
        let parsed =
            Url::parse(url).map_err(|e| FeedError::Connect(format!("invalid feed URL {url}: {e}")))?;
        match parsed.scheme() {
            "ws" | "wss" => Ok(Self { url: parsed }),
            other => Err(FeedError::Connect(format!(
                "unsupported URL scheme {other}, expected ws or wss"
            ))),
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl FeedTransport for WsTransport {
    async fn connect(&self) -> Result<Box<dyn FeedConnection>, FeedError> {
        debug!(url = %self.url, "Opening feed connection");
        let (stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| FeedError::Connect(e.to_string()))?;
        Ok(Box::new(WsConnection {
            stream,
            closed: false,
        }))
    }
}

struct WsConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

#[async_trait]
impl FeedConnection for WsConnection {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError> {
        if self.closed {
            return Err(FeedError::Transport("connection already closed".to_string()));
        }
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))
    }

    async fn next_frame(&mut self) -> Result<Option<Frame>, FeedError> {
        if self.closed {
            return Ok(None);
        }
        match self.stream.next().await {
            Some(Ok(Message::Text(text))) => Ok(Some(Frame::Text(text))),
            Some(Ok(Message::Binary(data))) => Ok(Some(Frame::Binary(data))),
            Some(Ok(Message::Ping(_))) => Ok(Some(Frame::Ping)),
            Some(Ok(Message::Pong(_))) => Ok(Some(Frame::Pong)),
            Some(Ok(Message::Frame(frame))) => Ok(Some(Frame::Binary(frame.into_data()))),
            Some(Ok(Message::Close(_))) | None => {
                self.closed = true;
                Ok(None)
            }
            Some(Err(e)) => {
                self.closed = true;
                Err(FeedError::Transport(e.to_string()))
            }
        }
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        finish_close(self.stream.close(None), CLOSE_TIMEOUT).await;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Awaits a close handshake for at most `limit`. Returns whether it
/// completed cleanly; either way the caller drops the socket afterwards.
async fn finish_close<F, E>(handshake: F, limit: Duration) -> bool
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(limit, handshake).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!(error = %e, "Feed connection close handshake failed");
            false
        }
        Err(_) => {
            debug!(
                limit_ms = limit.as_millis() as u64,
                "Feed connection close handshake timed out"
            );
            false
        }
    }
}
