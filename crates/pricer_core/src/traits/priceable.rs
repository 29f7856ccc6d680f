//! Trait for priceable instruments.

use num_traits::Float;

/// Trait for entities that can be priced in closed form.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// Implementations must be pure: the same instrument always prices to the
/// same value, and pricing never fails. An instrument whose parameters are
/// out of domain prices to zero.
///
/// ```
/// use pricer_core::traits::Priceable;
///
/// struct Forward {
///     spot: f64,
///     strike: f64,
///     discount: f64,
/// }
///
/// impl Priceable<f64> for Forward {
///     type Sensitivities = f64;
///
///     fn price(&self) -> f64 {
///         self.spot - self.strike * self.discount
///     }
///
///     fn sensitivities(&self) -> f64 {
///         1.0
///     }
/// }
///
/// let fwd = Forward { spot: 100.0, strike: 95.0, discount: 1.0 };
/// assert_eq!(fwd.price(), 5.0);
/// assert_eq!(fwd.sensitivities(), 1.0);
/// ```
pub trait Priceable<T: Float> {
    /// Sensitivity bundle produced alongside the price.
    type Sensitivities;

    /// Calculate the fair value of the instrument.
    fn price(&self) -> T;

    /// Calculate the instrument's sensitivities at the same inputs.
    fn sensitivities(&self) -> Self::Sensitivities;
}
