//! CLI error types.

use adapter_feeds::FeedError;
use pricer_core::types::TimeError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment override is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command-line argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Expiry could not be interpreted.
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    /// Volatility feed failure that cannot fall back.
    #[error("Volatility feed error: {0}")]
    Feed(#[from] FeedError),

    /// Reading a file or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialised.
    #[error("Serialisation error: {0}")]
    Serialisation(String),
}

impl From<InstrumentError> for CliError {
    fn from(err: InstrumentError) -> Self {
        CliError::InvalidArgument(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_input_is_invalid_argument() {
        let err: CliError = InstrumentError::NonFinite {
            field: "spot",
            value: f64::NAN,
        }
        .into();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Invalid argument: Non-finite spot: NaN");
    }

    #[test]
    fn test_feed_error_display() {
        let err: CliError = FeedError::UnsupportedAsset("DOGE".to_string()).into();
        assert!(err.to_string().starts_with("Volatility feed error:"));
        assert!(err.to_string().contains("DOGE"));
    }
}
