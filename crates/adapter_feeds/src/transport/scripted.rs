//! In-memory transport that replays scripted connections.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{FeedConnection, FeedTransport, Frame};
use crate::error::FeedError;

/// Behaviour of one scripted connection attempt.
#[derive(Debug, Clone)]
pub enum Script {
    /// Accept, deliver `frames` in order, then either report the peer
    /// closing (`then_close`) or stay open without sending anything.
    Respond {
        /// Frames delivered after the request is sent
        frames: Vec<Frame>,
        /// Whether the peer closes once the frames are exhausted
        then_close: bool,
    },
    /// Refuse the connection with a message.
    Refuse(String),
    /// Never complete the connection attempt.
    Hang,
}

impl Script {
    /// Delivers frames, then stays silent.
    pub fn respond(frames: impl IntoIterator<Item = Frame>) -> Self {
        Script::Respond {
            frames: frames.into_iter().collect(),
            then_close: false,
        }
    }

    /// Delivers frames, then the peer closes.
    pub fn respond_then_close(frames: impl IntoIterator<Item = Frame>) -> Self {
        Script::Respond {
            frames: frames.into_iter().collect(),
            then_close: true,
        }
    }

    /// Accepts and never answers.
    pub fn silent() -> Self {
        Self::respond(Vec::new())
    }
}

#[derive(Debug, Default)]
struct ConnectionLog {
    closed: AtomicBool,
    sent: Mutex<Vec<String>>,
}

/// Transport whose connections follow a fixed script, one entry per
/// connection attempt. Attempts beyond the script are refused.
///
/// Records every connection so tests can check that each one was closed
/// and inspect the requests sent on it.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: Mutex<VecDeque<Script>>,
    connections: Mutex<Vec<Arc<ConnectionLog>>>,
}

impl ScriptedTransport {
    /// Creates a transport replaying `scripts` in order.
    pub fn new(scripts: impl IntoIterator<Item = Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            connections: Mutex::new(Vec::new()),
        }
    }

    /// Number of accepted connections so far.
    pub fn connection_count(&self) -> usize {
        lock(&self.connections).len()
    }

    /// Returns whether every accepted connection has been closed.
    pub fn all_closed(&self) -> bool {
        lock(&self.connections)
            .iter()
            .all(|log| log.closed.load(Ordering::SeqCst))
    }

    /// Text frames sent by the client across all connections, in order.
    pub fn sent_requests(&self) -> Vec<String> {
        lock(&self.connections)
            .iter()
            .flat_map(|log| lock(&log.sent).clone())
            .collect()
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    async fn connect(&self) -> Result<Box<dyn FeedConnection>, FeedError> {
        let script = lock(&self.scripts).pop_front();
        match script {
            Some(Script::Respond { frames, then_close }) => {
                let log = Arc::new(ConnectionLog::default());
                lock(&self.connections).push(Arc::clone(&log));
                Ok(Box::new(ScriptedConnection {
                    frames: frames.into(),
                    then_close,
                    log,
                }))
            }
            Some(Script::Refuse(message)) => Err(FeedError::Connect(message)),
            Some(Script::Hang) => std::future::pending().await,
            None => Err(FeedError::Connect("no scripted connection left".to_string())),
        }
    }
}

struct ScriptedConnection {
    frames: VecDeque<Frame>,
    then_close: bool,
    log: Arc<ConnectionLog>,
}

#[async_trait]
impl FeedConnection for ScriptedConnection {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError> {
        if self.is_closed() {
            return Err(FeedError::Transport("connection already closed".to_string()));
        }
        lock(&self.log.sent).push(text);
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Option<Frame>, FeedError> {
        if self.is_closed() {
            return Ok(None);
        }
        if let Some(frame) = self.frames.pop_front() {
            return Ok(Some(frame));
        }
        if self.then_close {
            self.log.closed.store(true, Ordering::SeqCst);
            return Ok(None);
        }
        std::future::pending().await
    }

    async fn close(&mut self) {
        self.log.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.log.closed.load(Ordering::SeqCst)
    }
}

// Guarded data is append-only, so a poisoned lock is still usable
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
