//! Payoff curve generation.

use num_traits::Float;

use crate::instruments::{OptionContract, OptionSide};

/// Number of equal steps across the sampled price window.
pub const CURVE_STEPS: usize = 100;

/// Number of sampled points, both window ends included.
pub const CURVE_POINTS: usize = CURVE_STEPS + 1;

/// Half-width of the price window as a fraction of spot.
pub const RANGE_FRACTION: f64 = 0.75;

/// Buyer and seller profit-or-loss at one underlying price at expiry.
///
/// `seller_pnl` is always the exact negation of `buyer_pnl`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffPoint<T: Float> {
    /// Underlying price at expiry
    pub underlying_price: T,
    /// Long position P&L: intrinsic value minus premium paid
    pub buyer_pnl: T,
    /// Short position P&L: premium received minus intrinsic value
    pub seller_pnl: T,
}

impl<T: Float> PayoffPoint<T> {
    fn new(underlying_price: T, buyer_pnl: T) -> Self {
        Self {
            underlying_price,
            buyer_pnl,
            seller_pnl: -buyer_pnl,
        }
    }

    /// Copy with every field rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            underlying_price: round2(self.underlying_price),
            buyer_pnl: round2(self.buyer_pnl),
            seller_pnl: round2(self.seller_pnl),
        }
    }
}

/// Ordered buyer/seller P&L profile of a single option position.
///
/// The window is `[max(0, K - 0.75·S), K + 0.75·S]`, split into
/// [`CURVE_STEPS`] equal steps; the last point is pinned to the upper bound
/// so accumulated floating-point error never moves it. Points are in
/// ascending price order.
///
/// A curve with non-positive or non-finite spot or strike, or a non-finite
/// premium, has no points.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionSide;
/// use pricer_models::payoff::PayoffCurve;
///
/// let curve = PayoffCurve::generate(100.0_f64, 100.0, 10.0, OptionSide::Call);
/// assert_eq!(curve.len(), 101);
///
/// let first = curve.points()[0];
/// assert_eq!(first.underlying_price, 25.0);
/// assert_eq!(first.buyer_pnl, -10.0);
/// assert_eq!(curve.points()[100].underlying_price, 175.0);
/// assert_eq!(curve.breakeven(), 110.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffCurve<T: Float> {
    spot: T,
    strike: T,
    premium: T,
    side: OptionSide,
    points: Vec<PayoffPoint<T>>,
}

impl<T: Float> PayoffCurve<T> {
    /// Samples the curve for a position.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price, sets the window width
    /// * `strike` - Strike price, the window centre
    /// * `premium` - Premium already computed for the same contract
    /// * `side` - Call or put
    pub fn generate(spot: T, strike: T, premium: T, side: OptionSide) -> Self {
        let points = if is_samplable(spot, strike, premium) {
            sample(spot, strike, premium, side)
        } else {
            Vec::new()
        };
        Self {
            spot,
            strike,
            premium,
            side,
            points,
        }
    }

    /// Samples the curve for a contract's spot, strike and side.
    pub fn for_contract(contract: &OptionContract<T>, premium: T) -> Self {
        Self::generate(
            contract.spot(),
            contract.strike(),
            premium,
            contract.side(),
        )
    }

    /// Sampled points in ascending price order.
    #[inline]
    pub fn points(&self) -> &[PayoffPoint<T>] {
        &self.points
    }

    /// Iterates over the sampled points.
    pub fn iter(&self) -> std::slice::Iter<'_, PayoffPoint<T>> {
        self.points.iter()
    }

    /// Number of sampled points: [`CURVE_POINTS`], or zero for degenerate input.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the curve has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spot the window was built around.
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Strike of the position.
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Premium paid by the buyer.
    pub fn premium(&self) -> T {
        self.premium
    }

    /// Side of the position.
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Points rounded to two decimals for presentation.
    ///
    /// Rounding is symmetric about zero, so the rounded buyer and seller
    /// values still negate each other.
    pub fn rounded(&self) -> Vec<PayoffPoint<T>> {
        self.points.iter().map(PayoffPoint::rounded).collect()
    }

    /// Underlying price at which the buyer's P&L is zero.
    ///
    /// `K + premium` for a call, `K - premium` for a put.
    pub fn breakeven(&self) -> T {
        if self.side.is_call() {
            self.strike + self.premium
        } else {
            self.strike - self.premium
        }
    }

    /// Largest possible buyer loss, which is the premium.
    pub fn max_buyer_loss(&self) -> T {
        self.premium
    }
}

impl<'a, T: Float> IntoIterator for &'a PayoffCurve<T> {
    type Item = &'a PayoffPoint<T>;
    type IntoIter = std::slice::Iter<'a, PayoffPoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn is_samplable<T: Float>(spot: T, strike: T, premium: T) -> bool {
    let zero = T::zero();
    spot.is_finite() && strike.is_finite() && premium.is_finite() && spot > zero && strike > zero
}

fn sample<T: Float>(spot: T, strike: T, premium: T, side: OptionSide) -> Vec<PayoffPoint<T>> {
    let half_width = T::from(RANGE_FRACTION).unwrap() * spot;
    let lower = (strike - half_width).max(T::zero());
    let upper = strike + half_width;
    let step = (upper - lower) / T::from(CURVE_STEPS).unwrap();

    (0..CURVE_POINTS)
        .map(|i| {
            let price = if i == CURVE_STEPS {
                upper
            } else {
                lower + step * T::from(i).unwrap()
            };
            PayoffPoint::new(price, side.intrinsic(price, strike) - premium)
        })
        .collect()
}

/// Rounds to two decimals, half away from zero, without negative zero.
///
/// The rounding applied by [`PayoffPoint::rounded`], exposed so summary
/// figures next to a rounded curve agree with it.
///
/// # Examples
/// ```
/// use pricer_models::payoff::round2;
///
/// assert_eq!(round2(110.456_f64), 110.46);
/// assert!(round2(-0.001_f64).is_sign_positive());
/// ```
#[inline]
pub fn round2<T: Float>(value: T) -> T {
    let hundred = T::from(100.0).unwrap();
    let rounded = (value * hundred).round() / hundred;
    // Drop the sign of negative zero
    if rounded == T::zero() {
        T::zero()
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_and_point_count() {
        let curve = PayoffCurve::generate(40_000.0_f64, 42_000.0, 1_500.0, OptionSide::Call);
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve.points()[0].underlying_price, 12_000.0);
        assert_eq!(curve.points()[CURVE_STEPS].underlying_price, 72_000.0);
    }

    #[test]
    fn test_lower_bound_clamped_at_zero() {
        let curve = PayoffCurve::generate(200.0_f64, 100.0, 5.0, OptionSide::Put);
        assert_eq!(curve.points()[0].underlying_price, 0.0);
        assert_eq!(curve.points()[CURVE_STEPS].underlying_price, 250.0);
        assert_eq!(curve.points()[0].buyer_pnl, 95.0);
    }

    #[test]
    fn test_uniform_ascending_steps() {
        let curve = PayoffCurve::generate(100.0_f64, 90.0, 3.0, OptionSide::Call);
        let step = 150.0 / 100.0;
        for pair in curve.points().windows(2) {
            assert!(pair[1].underlying_price > pair[0].underlying_price);
            assert_relative_eq!(
                pair[1].underlying_price - pair[0].underlying_price,
                step,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_call_buyer_pnl() {
        let curve = PayoffCurve::generate(100.0_f64, 100.0, 10.0, OptionSide::Call);
        for p in &curve {
            let expected = (p.underlying_price - 100.0).max(0.0) - 10.0;
            assert_eq!(p.buyer_pnl, expected);
        }
    }

    #[test]
    fn test_put_buyer_pnl() {
        let curve = PayoffCurve::generate(100.0_f64, 100.0, 6.0, OptionSide::Put);
        for p in curve.iter() {
            let expected = (100.0 - p.underlying_price).max(0.0) - 6.0;
            assert_eq!(p.buyer_pnl, expected);
        }
    }

    #[test]
    fn test_zero_sum_exact() {
        let curve = PayoffCurve::generate(123.45_f64, 117.3, 8.765, OptionSide::Put);
        for p in &curve {
            assert_eq!(p.buyer_pnl + p.seller_pnl, 0.0);
        }
    }

    #[test]
    fn test_rounded_two_decimals() {
        let curve = PayoffCurve::generate(123.45_f64, 117.3, 8.765, OptionSide::Call);
        for p in curve.rounded() {
            assert_relative_eq!((p.buyer_pnl * 100.0).round(), p.buyer_pnl * 100.0, epsilon = 1e-6);
            assert!((p.buyer_pnl + p.seller_pnl).abs() <= 0.01);
        }
    }

    #[test]
    fn test_rounded_has_no_negative_zero() {
        let curve = PayoffCurve::generate(100.0_f64, 100.0, 0.001, OptionSide::Call);
        let first = curve.rounded()[0];
        assert_eq!(first.buyer_pnl, 0.0);
        assert!(first.seller_pnl.is_sign_positive());
    }

    #[test]
    fn test_round2_helper() {
        assert_eq!(round2(10.005_f64 + 1e-9), 10.01);
        assert_eq!(round2(-2.345_f64 - 1e-9), -2.35);
        assert_eq!(round2(7.0_f64), 7.0);
        let zero = round2(-0.004_f64);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
    }

    #[test]
    fn test_breakeven_and_max_loss() {
        let call = PayoffCurve::generate(100.0_f64, 100.0, 10.0, OptionSide::Call);
        let put = PayoffCurve::generate(100.0_f64, 100.0, 6.0, OptionSide::Put);
        assert_eq!(call.breakeven(), 110.0);
        assert_eq!(put.breakeven(), 94.0);
        assert_eq!(call.max_buyer_loss(), 10.0);
        let worst = call.iter().map(|p| p.buyer_pnl).fold(f64::INFINITY, f64::min);
        assert_eq!(-worst, call.max_buyer_loss());
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_curve() {
        assert!(PayoffCurve::generate(0.0_f64, 100.0, 1.0, OptionSide::Call).is_empty());
        assert!(PayoffCurve::generate(100.0_f64, -1.0, 1.0, OptionSide::Call).is_empty());
        assert!(PayoffCurve::generate(100.0_f64, 100.0, f64::NAN, OptionSide::Put).is_empty());
        assert!(PayoffCurve::generate(f64::INFINITY, 100.0, 1.0, OptionSide::Put).is_empty());
    }

    #[test]
    fn test_zero_premium_is_samplable() {
        let curve = PayoffCurve::generate(100.0_f64, 100.0, 0.0, OptionSide::Call);
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve.max_buyer_loss(), 0.0);
    }

    #[test]
    fn test_for_contract_uses_contract_fields() {
        let contract = OptionContract::new(100.0_f64, 105.0, 0.5, 0.3, 0.01, OptionSide::Put);
        let curve = PayoffCurve::for_contract(&contract, 7.5);
        assert_eq!(curve, PayoffCurve::generate(100.0, 105.0, 7.5, OptionSide::Put));
        assert_eq!(curve.side(), OptionSide::Put);
        assert_eq!(curve.spot(), 100.0);
        assert_eq!(curve.strike(), 105.0);
        assert_eq!(curve.premium(), 7.5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_zero_sum_before_rounding(
                spot in 0.01..100_000.0_f64,
                strike in 0.01..100_000.0_f64,
                premium in 0.0..10_000.0_f64,
                is_call in any::<bool>(),
            ) {
                let side = if is_call { OptionSide::Call } else { OptionSide::Put };
                let curve = PayoffCurve::generate(spot, strike, premium, side);
                prop_assert_eq!(curve.len(), CURVE_POINTS);
                for p in &curve {
                    prop_assert_eq!(p.buyer_pnl + p.seller_pnl, 0.0);
                    prop_assert!(p.buyer_pnl >= -premium);
                }
            }

            #[test]
            fn prop_last_point_pinned_to_upper_bound(
                spot in 0.01..100_000.0_f64,
                strike in 0.01..100_000.0_f64,
            ) {
                let curve = PayoffCurve::generate(spot, strike, 1.0, OptionSide::Call);
                let last = curve.points()[CURVE_STEPS];
                prop_assert_eq!(last.underlying_price, strike + 0.75 * spot);
            }
        }
    }
}
