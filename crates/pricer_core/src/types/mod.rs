//! Core time and error types.
//!
//! This module provides:
//! - `time`: Time-to-expiry normalisation onto a 365-day year
//! - `error`: Structured error types for pricing and time handling
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`TimeToExpiry`], [`year_fraction_from_instant`], [`year_fraction_from_duration`],
//!   [`year_fraction_until`], [`parse_expiry`] from `time`
//! - [`PricingError`], [`TimeError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{PricingError, TimeError};
pub use time::{
    parse_expiry, year_fraction_from_duration, year_fraction_from_instant, year_fraction_until,
    TimeToExpiry,
};
