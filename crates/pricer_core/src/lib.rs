//! # pricer_core: Mathematical Foundation for Greekscope
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Standard normal distribution primitives (`math::distributions`)
//! - Time-to-expiry normalisation onto a 365-day year (`types::time`)
//! - The `Priceable` trait implemented by instruments (`traits`)
//! - Error types: `PricingError`, `TimeError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Instant arithmetic for expiry handling
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::{norm_cdf, norm_pdf};
//! use pricer_core::types::time::year_fraction_from_duration;
//!
//! // One day expressed on the 365-day convention
//! let t = year_fraction_from_duration(24.0, 0.0, 0.0);
//! assert!((t - 1.0 / 365.0).abs() < 1e-15);
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! assert!(norm_pdf(0.0_f64) > 0.39);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `TimeToExpiry`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
