//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations that opt into explicit failure
//! - `TimeError`: Errors from time-to-expiry construction and parsing

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// The default pricing path never fails (a degenerate contract prices to
/// zero); this type is produced only by the explicit `try_*` entry points of
/// the pricing layer.
///
/// # Variants
/// - `InvalidInput`: Invalid contract parameters
/// - `NumericalInstability`: Computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Time-to-expiry errors.
///
/// # Variants
/// - `Parse`: Expiry string matched none of the accepted formats
/// - `NegativeDuration`: A duration component was negative or not finite
///
/// # Examples
/// ```
/// use pricer_core::types::TimeError;
///
/// let err = TimeError::Parse("tomorrow".to_string());
/// assert_eq!(format!("{}", err), "Unrecognised expiry: tomorrow");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    /// Failed to parse expiry string.
    #[error("Unrecognised expiry: {0}")]
    Parse(String),

    /// Duration component out of range.
    #[error("Invalid duration: {component} = {value} (must be finite and non-negative)")]
    NegativeDuration {
        /// Name of the offending component
        component: &'static str,
        /// The offending value
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::NumericalInstability("premium is NaN".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: premium is NaN");
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        let err = PricingError::InvalidInput("x".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_time_error_display() {
        let err = TimeError::NegativeDuration {
            component: "hours",
            value: -2.0,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid duration: hours = -2 (must be finite and non-negative)"
        );
    }
}
