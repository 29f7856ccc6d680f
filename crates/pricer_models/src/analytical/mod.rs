//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes premium for calls and puts
//! - Analytical Greeks (Delta, Gamma, Theta, Vega, Rho)
//! - Explicit errors for callers that opt out of the zero-result policy
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports both `f32` and `f64`
//! - **One evaluation**: premium and Greeks share the same d₁/d₂ terms
//! - **Guard first**: degenerate inputs never reach `ln`, `sqrt` or a division

pub mod black_scholes;
pub mod error;
pub mod greeks;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use error::AnalyticalError;
pub use greeks::{GreeksResult, Valuation};
