//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: reasons a contract cannot be priced, reported by the
//!   explicit `try_*` API of the Black-Scholes engine

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// The infallible API maps every one of these conditions to a zero result;
/// callers outside an interactive context can use `try_price`/`try_greeks`
/// to receive them instead.
///
/// # Variants
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidVolatility`: Non-positive volatility
/// - `NumericalInstability`: Computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid time to expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid year-fraction
        expiry: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
