//! Feed error types.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by a volatility feed cycle.
///
/// Every variant except `UnsupportedAsset` describes a failed cycle that
/// the next poll tick may recover from; callers keep the previous sample
/// and log a warning.
///
/// # Variants
/// - `UnsupportedAsset`: Asset not in the allow-list
/// - `Connect`: Connection could not be established
/// - `Transport`: Connection failed or was closed by the peer mid-cycle
/// - `Remote`: The endpoint answered with an explicit error payload
/// - `Malformed`: Response did not have the expected structure
/// - `EmptyResult`: Response carried an empty observation list
/// - `Timeout`: No usable response before the deadline
/// - `Cancelled`: The cycle was aborted by a shutdown signal
///
/// # Examples
/// ```
/// use adapter_feeds::FeedError;
/// use std::time::Duration;
///
/// let err = FeedError::Timeout(Duration::from_secs(5));
/// assert_eq!(format!("{}", err), "No response within 5s");
/// assert!(err.is_recoverable());
/// assert!(!FeedError::UnsupportedAsset("DOGE".into()).is_recoverable());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// Asset is not in the supported set.
    #[error("Unsupported asset: {0}")]
    UnsupportedAsset(String),

    /// Failed to open the connection.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Connection error after it was opened.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Explicit error payload from the endpoint.
    #[error("Remote error: {message}")]
    Remote {
        /// JSON-RPC error code, when present
        code: Option<i64>,
        /// Error message from the endpoint
        message: String,
    },

    /// Response was not structurally valid.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Response contained no observations.
    #[error("Empty volatility series")]
    EmptyResult,

    /// Deadline elapsed.
    #[error("No response within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Cycle aborted by shutdown.
    #[error("Feed cycle cancelled")]
    Cancelled,
}

impl FeedError {
    /// Returns whether the next cycle may succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FeedError::UnsupportedAsset(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            format!("{}", FeedError::UnsupportedAsset("SOL".to_string())),
            "Unsupported asset: SOL"
        );
        assert_eq!(
            format!(
                "{}",
                FeedError::Remote {
                    code: Some(10_001),
                    message: "rate limited".to_string()
                }
            ),
            "Remote error: rate limited"
        );
        assert_eq!(
            format!("{}", FeedError::Timeout(Duration::from_millis(2_500))),
            "No response within 2.5s"
        );
    }

    #[test]
    fn test_recoverability() {
        let recoverable = [
            FeedError::Connect("refused".to_string()),
            FeedError::Transport("reset".to_string()),
            FeedError::Malformed("not json".to_string()),
            FeedError::EmptyResult,
            FeedError::Timeout(Duration::from_secs(5)),
            FeedError::Cancelled,
        ];
        for err in recoverable {
            assert!(err.is_recoverable(), "{err} should be recoverable");
        }
    }
}
