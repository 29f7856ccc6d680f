//! Option side (call or put).

use num_traits::Float;
use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Side of a European option.
///
/// # Variants
/// - `Call`: right to buy at the strike, payoff max(S - K, 0)
/// - `Put`: right to sell at the strike, payoff max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionSide;
///
/// let side: OptionSide = "put".parse().unwrap();
/// assert_eq!(side, OptionSide::Put);
/// assert_eq!(side.intrinsic(90.0_f64, 100.0), 10.0);
/// assert_eq!(OptionSide::Call.intrinsic(90.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionSide {
    /// Call option: max(S - K, 0)
    #[default]
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionSide {
    /// Intrinsic value at expiry for an underlying price and strike.
    ///
    /// This is the single definition of the call/put sign convention used
    /// by the payoff curve.
    #[inline]
    pub fn intrinsic<T: Float>(&self, underlying: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            OptionSide::Call => (underlying - strike).max(zero),
            OptionSide::Put => (strike - underlying).max(zero),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl FromStr for OptionSide {
    type Err = InstrumentError;

    /// Parses a side from "call"/"c" or "put"/"p" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            _ => Err(InstrumentError::UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_intrinsic() {
        assert_eq!(OptionSide::Call.intrinsic(110.0_f64, 100.0), 10.0);
        assert_eq!(OptionSide::Call.intrinsic(100.0_f64, 100.0), 0.0);
        assert_eq!(OptionSide::Call.intrinsic(90.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_put_intrinsic() {
        assert_eq!(OptionSide::Put.intrinsic(90.0_f64, 100.0), 10.0);
        assert_eq!(OptionSide::Put.intrinsic(110.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_is_call() {
        assert!(OptionSide::Call.is_call());
        assert!(!OptionSide::Put.is_call());
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("CALL".parse::<OptionSide>().unwrap(), OptionSide::Call);
        assert_eq!("c".parse::<OptionSide>().unwrap(), OptionSide::Call);
        assert_eq!(" Put ".parse::<OptionSide>().unwrap(), OptionSide::Put);
        assert_eq!("p".parse::<OptionSide>().unwrap(), OptionSide::Put);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "straddle".parse::<OptionSide>().unwrap_err();
        assert_eq!(err, InstrumentError::UnknownSide("straddle".to_string()));
    }

    #[test]
    fn test_display_roundtrip() {
        for side in [OptionSide::Call, OptionSide::Put] {
            assert_eq!(side.to_string().parse::<OptionSide>().unwrap(), side);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OptionSide::Put).unwrap(), "\"put\"");
        let side: OptionSide = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(side, OptionSide::Call);
    }
}
