//! Instrument error types.
//!
//! Contract parameters are only validated for type (finite numbers) at
//! construction; range checks belong to the pricing engine.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `UnknownSide`: Side string is neither call nor put
/// - `NonFinite`: A contract parameter is NaN or infinite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::NonFinite { field: "spot", value: f64::NAN };
/// assert!(format!("{}", err).contains("spot"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Unrecognised option side.
    #[error("Unknown option side: {0} (expected call or put)")]
    UnknownSide(String),

    /// Non-finite contract parameter.
    #[error("Non-finite {field}: {value}")]
    NonFinite {
        /// Name of the offending parameter
        field: &'static str,
        /// The offending value
        value: f64,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
