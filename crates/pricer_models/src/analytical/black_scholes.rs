//! Black-Scholes pricing model for European options.
//!
//! This module provides closed-form premiums and Greeks for European call
//! and put options under lognormal dynamics, evaluated on an
//! [`OptionContract`].
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Degenerate contracts
//!
//! A contract whose spot, strike, expiry or volatility is not strictly
//! positive is degenerate. [`BlackScholes::price`] returns exactly zero and
//! [`BlackScholes::greeks`] returns [`GreeksResult::zero`] for it; the check
//! runs before any division, logarithm or square root. The `try_*` variants
//! report the same condition as an [`AnalyticalError`].
//!
//! A contract whose σ·√T underflows to zero is treated as degenerate too,
//! so d₁ is never computed as 0/0. The `try_*` variants report it as
//! `NumericalInstability`.

use num_traits::Float;
use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::traits::Priceable;

use super::error::AnalyticalError;
use super::greeks::{GreeksResult, Valuation};
use crate::instruments::{OptionContract, OptionSide};

/// Calendar days per year used to express theta per day.
const THETA_DAYS_PER_YEAR: f64 = 365.0;

/// Scale from a raw derivative to a one-percentage-point move.
const PER_POINT: f64 = 0.01;

/// Black-Scholes engine for European options.
///
/// The engine is stateless: every operation is a pure function of the
/// contract passed in, so the same contract always produces the same
/// numbers.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::{OptionContract, OptionSide};
///
/// let call = OptionContract::new(100.0_f64, 100.0, 1.0, 0.2, 0.05, OptionSide::Call);
/// let put = call.with_side(OptionSide::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = BlackScholes::price(&call) - BlackScholes::price(&put)
///     - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl BlackScholes {
    /// Computes the d₁ and d₂ terms.
    ///
    /// Returns `None` for a degenerate contract, including one whose σ·√T
    /// underflows to zero.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionContract, OptionSide};
    ///
    /// let c = OptionContract::new(100.0_f64, 100.0, 1.0, 0.2, 0.05, OptionSide::Call);
    /// let (d1, d2) = BlackScholes::d1_d2(&c).unwrap();
    /// assert!((d1 - 0.35).abs() < 1e-12);
    /// assert!((d2 - 0.15).abs() < 1e-12);
    ///
    /// assert!(BlackScholes::d1_d2(&c.with_expiry(0.0)).is_none());
    /// ```
    #[inline]
    pub fn d1_d2<T: Float>(contract: &OptionContract<T>) -> Option<(T, T)> {
        if !contract.is_valid() {
            return None;
        }
        let half = T::from(0.5).unwrap();
        let sigma = contract.volatility();
        let vol_sqrt_t = sigma * contract.expiry().sqrt();
        if !(vol_sqrt_t > T::zero()) {
            return None;
        }

        let log_moneyness = (contract.spot() / contract.strike()).ln();
        let drift = (contract.rate() + half * sigma * sigma) * contract.expiry();

        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        Some((d1, d1 - vol_sqrt_t))
    }

    /// Computes the premium.
    ///
    /// Returns exactly zero for a degenerate contract.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionContract, OptionSide};
    ///
    /// let call = OptionContract::new(100.0_f64, 100.0, 1.0, 0.2, 0.05, OptionSide::Call);
    /// assert!((BlackScholes::price(&call) - 10.4506).abs() < 1e-4);
    ///
    /// // Zero time remaining: degenerate, not an error
    /// assert_eq!(BlackScholes::price(&call.with_expiry(0.0)), 0.0);
    /// ```
    pub fn price<T: Float>(contract: &OptionContract<T>) -> T {
        match Self::d1_d2(contract) {
            Some((d1, d2)) => premium_at(contract, d1, d2),
            None => T::zero(),
        }
    }

    /// Computes delta, gamma, theta, vega and rho.
    ///
    /// Returns all zeros for a degenerate contract.
    pub fn greeks<T: Float>(contract: &OptionContract<T>) -> GreeksResult<T> {
        match Self::d1_d2(contract) {
            Some((d1, d2)) => greeks_at(contract, d1, d2),
            None => GreeksResult::zero(),
        }
    }

    /// Computes the premium and Greeks from a single d₁/d₂ evaluation.
    pub fn value<T: Float>(contract: &OptionContract<T>) -> Valuation<T> {
        match Self::d1_d2(contract) {
            Some((d1, d2)) => Valuation {
                premium: premium_at(contract, d1, d2),
                greeks: greeks_at(contract, d1, d2),
            },
            None => Valuation::zero(),
        }
    }

    /// Computes the premium, reporting a degenerate contract as an error.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    /// - `AnalyticalError::NumericalInstability` if the premium is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::{AnalyticalError, BlackScholes};
    /// use pricer_models::instruments::{OptionContract, OptionSide};
    ///
    /// let put = OptionContract::new(100.0_f64, 100.0, 1.0, 0.0, 0.05, OptionSide::Put);
    /// assert_eq!(
    ///     BlackScholes::try_price(&put),
    ///     Err(AnalyticalError::InvalidVolatility { volatility: 0.0 })
    /// );
    /// ```
    pub fn try_price<T: Float>(contract: &OptionContract<T>) -> Result<T, AnalyticalError> {
        check_domain(contract)?;
        let (d1, d2) = Self::d1_d2(contract).ok_or_else(|| underflow(contract))?;
        let premium = premium_at(contract, d1, d2);
        if !premium.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite premium for {} option", contract.side()),
            });
        }
        Ok(premium)
    }

    /// Computes the Greeks, reporting a degenerate contract as an error.
    ///
    /// # Errors
    /// Same conditions as [`BlackScholes::try_price`].
    pub fn try_greeks<T: Float>(
        contract: &OptionContract<T>,
    ) -> Result<GreeksResult<T>, AnalyticalError> {
        check_domain(contract)?;
        let (d1, d2) = Self::d1_d2(contract).ok_or_else(|| underflow(contract))?;
        let greeks = greeks_at(contract, d1, d2);
        if !greeks.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite Greeks for {} option", contract.side()),
            });
        }
        Ok(greeks)
    }
}

impl<T: Float> Priceable<T> for OptionContract<T> {
    type Sensitivities = GreeksResult<T>;

    fn price(&self) -> T {
        BlackScholes::price(self)
    }

    fn sensitivities(&self) -> GreeksResult<T> {
        BlackScholes::greeks(self)
    }
}

fn check_domain<T: Float>(contract: &OptionContract<T>) -> Result<(), AnalyticalError> {
    let zero = T::zero();
    let as_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);

    // Negated comparisons so that NaN is rejected too
    if !(contract.spot() > zero) {
        return Err(AnalyticalError::InvalidSpot {
            spot: as_f64(contract.spot()),
        });
    }
    if !(contract.strike() > zero) {
        return Err(AnalyticalError::InvalidStrike {
            strike: as_f64(contract.strike()),
        });
    }
    if !(contract.expiry() > zero) {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: as_f64(contract.expiry()),
        });
    }
    if !(contract.volatility() > zero) {
        return Err(AnalyticalError::InvalidVolatility {
            volatility: as_f64(contract.volatility()),
        });
    }
    Ok(())
}

fn underflow<T: Float>(contract: &OptionContract<T>) -> AnalyticalError {
    AnalyticalError::NumericalInstability {
        message: format!(
            "volatility x sqrt(expiry) underflows to zero for {} option",
            contract.side()
        ),
    }
}

#[inline]
fn premium_at<T: Float>(contract: &OptionContract<T>, d1: T, d2: T) -> T {
    let spot = contract.spot();
    let discounted_strike = contract.strike() * (-contract.rate() * contract.expiry()).exp();

    match contract.side() {
        OptionSide::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionSide::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

fn greeks_at<T: Float>(contract: &OptionContract<T>, d1: T, d2: T) -> GreeksResult<T> {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let per_point = T::from(PER_POINT).unwrap();
    let days = T::from(THETA_DAYS_PER_YEAR).unwrap();

    let spot = contract.spot();
    let strike = contract.strike();
    let expiry = contract.expiry();
    let sigma = contract.volatility();
    let rate = contract.rate();

    let sqrt_t = expiry.sqrt();
    let pdf_d1 = norm_pdf(d1);
    let discount = (-rate * expiry).exp();

    let gamma = pdf_d1 / (spot * sigma * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t * per_point;
    let decay = -spot * sigma * pdf_d1 / (two * sqrt_t);

    let (delta, theta, rho) = match contract.side() {
        OptionSide::Call => {
            let n_d2 = norm_cdf(d2);
            (
                norm_cdf(d1),
                (decay - rate * strike * discount * n_d2) / days,
                strike * expiry * discount * n_d2 * per_point,
            )
        }
        OptionSide::Put => {
            let n_minus_d2 = norm_cdf(-d2);
            (
                norm_cdf(d1) - one,
                (decay + rate * strike * discount * n_minus_d2) / days,
                -strike * expiry * discount * n_minus_d2 * per_point,
            )
        }
    };

    GreeksResult {
        delta,
        gamma,
        theta,
        vega,
        rho,
    }
}
