//! Option contract definitions.
//!
//! This module provides:
//! - [`OptionContract`]: the five canonical pricing inputs plus side
//! - [`OptionSide`]: call or put, and the intrinsic-value convention
//! - [`InstrumentError`]: input validation errors

mod contract;
mod error;
mod side;

pub use contract::OptionContract;
pub use error::InstrumentError;
pub use side::OptionSide;
