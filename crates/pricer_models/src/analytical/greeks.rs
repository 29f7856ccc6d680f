//! Greeks result types.
//!
//! Provides [`GreeksResult<T>`] holding the five first-order sensitivities
//! (plus gamma) of an option premium, and [`Valuation<T>`] pairing them
//! with the premium itself.

use num_traits::Float;

/// Option sensitivities evaluated at a single contract.
///
/// Units follow trading-desk conventions rather than raw partial
/// derivatives:
///
/// - `delta`: ∂V/∂S
/// - `gamma`: ∂²V/∂S²
/// - `theta`: ∂V/∂t per calendar day (continuous-time value / 365)
/// - `vega`: ∂V/∂σ per one volatility point (raw value × 0.01)
/// - `rho`: ∂V/∂r per one rate point (raw value × 0.01)
///
/// A result is never updated in place; each computation returns a new one.
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::GreeksResult;
///
/// let zero = GreeksResult::<f64>::zero();
/// assert!(zero.is_zero());
/// assert_eq!(zero, GreeksResult::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult<T: Float> {
    /// Delta: ∂V/∂S (sensitivity to spot price).
    pub delta: T,
    /// Gamma: ∂²V/∂S² (convexity with respect to spot).
    pub gamma: T,
    /// Theta: time decay per calendar day.
    pub theta: T,
    /// Vega: sensitivity per one percentage point of volatility.
    pub vega: T,
    /// Rho: sensitivity per one percentage point of the rate.
    pub rho: T,
}

impl<T: Float> GreeksResult<T> {
    /// All sensitivities exactly zero; the result for a degenerate contract.
    #[inline]
    pub fn zero() -> Self {
        let zero = T::zero();
        Self {
            delta: zero,
            gamma: zero,
            theta: zero,
            vega: zero,
            rho: zero,
        }
    }

    /// Returns whether every sensitivity is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        let zero = T::zero();
        self.delta == zero
            && self.gamma == zero
            && self.theta == zero
            && self.vega == zero
            && self.rho == zero
    }

    /// Returns whether every sensitivity is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.theta.is_finite()
            && self.vega.is_finite()
            && self.rho.is_finite()
    }
}

impl<T: Float> Default for GreeksResult<T> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Premium together with its Greeks, computed from one set of d₁/d₂ terms.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Valuation<T: Float> {
    /// Fair value of the option.
    pub premium: T,
    /// Sensitivities at the same inputs.
    pub greeks: GreeksResult<T>,
}

impl<T: Float> Valuation<T> {
    /// Zero premium and zero Greeks.
    #[inline]
    pub fn zero() -> Self {
        Self {
            premium: T::zero(),
            greeks: GreeksResult::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_zero() {
        assert!(GreeksResult::<f64>::zero().is_zero());
        assert!(Valuation::<f64>::zero().greeks.is_zero());
        assert_eq!(Valuation::<f64>::zero().premium, 0.0);
    }

    #[test]
    fn test_is_zero_detects_any_non_zero() {
        let g = GreeksResult {
            rho: 1e-12,
            ..GreeksResult::<f64>::zero()
        };
        assert!(!g.is_zero());
    }

    #[test]
    fn test_is_finite() {
        let mut g = GreeksResult::<f64>::zero();
        assert!(g.is_finite());
        g.gamma = f64::NAN;
        assert!(!g.is_finite());
    }
}
