//! Profit-and-loss profiles at expiry.
//!
//! This module provides:
//! - [`PayoffPoint`]: buyer and seller P&L at one underlying price
//! - [`PayoffCurve`]: 101 points across a window around the strike
//! - [`round2`]: the two-decimal rounding used for display
//!
//! The curve consumes a premium that has already been computed; it never
//! calls the pricing engine.

mod curve;

pub use curve::{round2, PayoffCurve, PayoffPoint, CURVE_POINTS, CURVE_STEPS, RANGE_FRACTION};
