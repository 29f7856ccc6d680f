//! Core traits for priceable instruments.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait)
//! - Price and sensitivity calculation (`Priceable` trait)

/// Generic floating-point trait for numeric computations.
///
/// Re-exported so downstream crates can stay generic over `f32`/`f64`
/// without depending on num-traits directly.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::Priceable;
