//! # Pricer Models (L2: Business Logic)
//!
//! European option contracts, closed-form valuation and payoff profiles.
//!
//! This crate provides:
//! - Contract definitions: [`instruments::OptionContract`], [`instruments::OptionSide`]
//! - Black-Scholes premium and Greeks: [`analytical::BlackScholes`]
//! - Buyer/seller profit-and-loss curves: [`payoff::PayoffCurve`]
//!
//! ## Design Principles
//!
//! - **Pure functions**: every computation is a synchronous call on
//!   caller-owned values; nothing is cached or shared
//! - **Degenerate, not failing**: a contract with a non-positive spot,
//!   strike, expiry or volatility prices to exactly zero so callers that
//!   render intermediate input stay renderable; the `try_*` API reports the
//!   same condition as an error instead
//! - **One side convention**: intrinsic value lives on [`instruments::OptionSide`]
//!   and is shared by the engine's contract handling and the payoff curve
//!
//! ```
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::{OptionContract, OptionSide};
//! use pricer_models::payoff::PayoffCurve;
//!
//! let call: OptionContract<f64> = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionSide::Call);
//! let valuation = BlackScholes::value(&call);
//! assert!((valuation.premium - 10.4506).abs() < 1e-3);
//!
//! let curve = PayoffCurve::for_contract(&call, valuation.premium);
//! assert_eq!(curve.len(), 101);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod payoff;
