//! European option contract definition.

use num_traits::Float;

use super::error::InstrumentError;
use super::side::OptionSide;

/// European option contract: the five canonical pricing inputs plus side.
///
/// An `OptionContract` is an immutable value; changing an input means
/// building a new contract. Positivity of spot, strike, expiry and
/// volatility is deliberately *not* enforced here: a contract that violates
/// it is degenerate and prices to zero (see [`OptionContract::is_valid`]).
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionSide};
///
/// let call = OptionContract::new(100.0_f64, 105.0, 0.5, 0.65, 0.03, OptionSide::Call);
/// assert!(call.is_valid());
///
/// // Mid-edit input: zero expiry is accepted but degenerate
/// let expired = call.with_expiry(0.0);
/// assert!(!expired.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract<T: Float> {
    /// Spot price of the underlying (S)
    spot: T,
    /// Strike price (K)
    strike: T,
    /// Time to expiry as a year-fraction (T)
    expiry: T,
    /// Volatility as a decimal, 0.2 for 20% (σ)
    volatility: T,
    /// Continuously compounded risk-free rate as a decimal (r)
    rate: T,
    /// Call or put
    side: OptionSide,
}

impl<T: Float> OptionContract<T> {
    /// Creates a new contract without any validation.
    ///
    /// # Arguments
    /// * `spot` - Spot price
    /// * `strike` - Strike price
    /// * `expiry` - Year-fraction to expiry
    /// * `volatility` - Volatility as a decimal
    /// * `rate` - Risk-free rate as a decimal (may be zero or negative)
    /// * `side` - Call or put
    pub fn new(spot: T, strike: T, expiry: T, volatility: T, rate: T, side: OptionSide) -> Self {
        Self {
            spot,
            strike,
            expiry,
            volatility,
            rate,
            side,
        }
    }

    /// Creates a new contract, rejecting non-finite parameters.
    ///
    /// This is the type-level validation applied to raw user input; range
    /// checks are left to the pricing engine.
    ///
    /// # Errors
    /// - `InstrumentError::NonFinite` naming the first NaN or infinite parameter
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{OptionContract, OptionSide};
    ///
    /// assert!(OptionContract::try_new(100.0_f64, 100.0, 1.0, 0.2, 0.0, OptionSide::Put).is_ok());
    /// assert!(OptionContract::try_new(f64::NAN, 100.0, 1.0, 0.2, 0.0, OptionSide::Put).is_err());
    ///
    /// // Non-positive values pass: they are a pricing concern
    /// assert!(OptionContract::try_new(-1.0_f64, 100.0, 1.0, 0.2, 0.0, OptionSide::Put).is_ok());
    /// ```
    pub fn try_new(
        spot: T,
        strike: T,
        expiry: T,
        volatility: T,
        rate: T,
        side: OptionSide,
    ) -> Result<Self, InstrumentError> {
        let fields = [
            ("spot", spot),
            ("strike", strike),
            ("expiry", expiry),
            ("volatility", volatility),
            ("rate", rate),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InstrumentError::NonFinite {
                    field,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(Self::new(spot, strike, expiry, volatility, rate, side))
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the year-fraction to expiry.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// Returns the volatility (decimal).
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the risk-free rate (decimal).
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the option side.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Returns whether the contract can be priced.
    ///
    /// Spot, strike, expiry and volatility must all be strictly positive.
    /// NaN compares false and therefore also makes a contract invalid. The
    /// rate is never checked.
    #[inline]
    pub fn is_valid(&self) -> bool {
        let zero = T::zero();
        self.spot > zero && self.strike > zero && self.expiry > zero && self.volatility > zero
    }

    /// Copy of this contract with a different volatility.
    ///
    /// Used when a live volatility sample replaces the user-entered value.
    #[inline]
    pub fn with_volatility(self, volatility: T) -> Self {
        Self { volatility, ..self }
    }

    /// Copy of this contract with a different year-fraction to expiry.
    #[inline]
    pub fn with_expiry(self, expiry: T) -> Self {
        Self { expiry, ..self }
    }

    /// Copy of this contract on the other side.
    #[inline]
    pub fn with_side(self, side: OptionSide) -> Self {
        Self { side, ..self }
    }
}
