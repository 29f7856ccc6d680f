//! Time-to-expiry normalisation for option pricing.
//!
//! This module provides:
//! - `year_fraction_from_instant`: absolute expiry instant → year-fraction
//! - `year_fraction_from_duration`: explicit hours/minutes/seconds → year-fraction
//! - `TimeToExpiry`: the caller's choice between the two methods
//! - `parse_expiry`: parsing of user-supplied expiry instants
//!
//! Both paths use the same day-count convention (actual seconds over a
//! 365-day year) and the same sequence of floating-point operations, so an
//! option priced through either path gets an identical premium for equal
//! elapsed time.
//!
//! # Examples
//!
//! ```
//! use chrono::{Duration, Utc};
//! use pricer_core::types::time::{year_fraction_from_duration, year_fraction_from_instant};
//!
//! let now = Utc::now();
//! let by_instant = year_fraction_from_instant(now + Duration::hours(24), now);
//! let by_duration = year_fraction_from_duration(24.0, 0.0, 0.0);
//! assert_eq!(by_instant, by_duration);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

use super::error::TimeError;

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in the year used by the pricing convention (ACT/365 fixed).
pub const DAYS_PER_YEAR: f64 = 365.0;

const MILLIS_PER_SECOND: f64 = 1_000.0;

/// Converts an elapsed number of seconds to a year-fraction.
///
/// Seconds are converted to days first, then to years. Every entry point in
/// this module funnels through here.
#[inline]
fn seconds_to_years(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY / DAYS_PER_YEAR
}

/// Year-fraction between `now` and an absolute `expiry` instant.
///
/// Returns zero or a negative value if the expiry is not in the future.
/// That is not rejected here: the pricing engine treats a non-positive
/// time-to-expiry as a degenerate contract.
///
/// # Arguments
/// * `expiry` - Expiry instant
/// * `now` - Valuation instant
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use pricer_core::types::time::year_fraction_from_instant;
///
/// let now = Utc::now();
/// let t = year_fraction_from_instant(now + Duration::days(365), now);
/// assert!((t - 1.0).abs() < 1e-12);
///
/// // Expired options produce a negative year-fraction
/// assert!(year_fraction_from_instant(now - Duration::days(1), now) < 0.0);
/// ```
pub fn year_fraction_from_instant(expiry: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (expiry - now).num_milliseconds();
    seconds_to_years(millis as f64 / MILLIS_PER_SECOND)
}

/// Year-fraction between the current system time and `expiry`.
///
/// Convenience wrapper around [`year_fraction_from_instant`] using
/// `Utc::now()` as the valuation instant.
pub fn year_fraction_until(expiry: DateTime<Utc>) -> f64 {
    year_fraction_from_instant(expiry, Utc::now())
}

/// Year-fraction for an explicit duration.
///
/// Total elapsed seconds are converted to days and then to years with the
/// same 365-day convention as [`year_fraction_from_instant`]. Components are
/// expected to be non-negative; [`TimeToExpiry::duration`] enforces that for
/// user input.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::year_fraction_from_duration;
///
/// let half_day = year_fraction_from_duration(12.0, 0.0, 0.0);
/// assert!((half_day - 0.5 / 365.0).abs() < 1e-15);
///
/// let mixed = year_fraction_from_duration(1.0, 30.0, 15.0);
/// assert!((mixed - 5415.0 / 86_400.0 / 365.0).abs() < 1e-15);
/// ```
pub fn year_fraction_from_duration(hours: f64, minutes: f64, seconds: f64) -> f64 {
    let total_seconds = hours * 3_600.0 + minutes * 60.0 + seconds;
    seconds_to_years(total_seconds)
}

/// Time-to-expiry as selected by the caller.
///
/// # Variants
/// - `Instant`: an absolute expiry instant, measured against a valuation time
/// - `Duration`: an explicit remaining duration
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use pricer_core::types::time::TimeToExpiry;
///
/// let ttx = TimeToExpiry::duration(48.0, 0.0, 0.0).unwrap();
/// assert!((ttx.year_fraction_at(Utc::now()) - 2.0 / 365.0).abs() < 1e-15);
///
/// assert!(TimeToExpiry::duration(-1.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeToExpiry {
    /// Absolute expiry instant.
    Instant(DateTime<Utc>),

    /// Remaining duration until expiry.
    Duration {
        /// Hours component
        hours: f64,
        /// Minutes component
        minutes: f64,
        /// Seconds component
        seconds: f64,
    },
}

impl TimeToExpiry {
    /// Creates a duration-based time-to-expiry.
    ///
    /// # Errors
    /// - `TimeError::NegativeDuration` if any component is negative or not finite
    pub fn duration(hours: f64, minutes: f64, seconds: f64) -> Result<Self, TimeError> {
        for (component, value) in [("hours", hours), ("minutes", minutes), ("seconds", seconds)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimeError::NegativeDuration { component, value });
            }
        }
        Ok(TimeToExpiry::Duration {
            hours,
            minutes,
            seconds,
        })
    }

    /// Creates an instant-based time-to-expiry.
    pub fn instant(expiry: DateTime<Utc>) -> Self {
        TimeToExpiry::Instant(expiry)
    }

    /// Year-fraction measured at the valuation instant `now`.
    ///
    /// `now` is ignored for duration-based inputs.
    pub fn year_fraction_at(&self, now: DateTime<Utc>) -> f64 {
        match *self {
            TimeToExpiry::Instant(expiry) => year_fraction_from_instant(expiry, now),
            TimeToExpiry::Duration {
                hours,
                minutes,
                seconds,
            } => year_fraction_from_duration(hours, minutes, seconds),
        }
    }

    /// Year-fraction measured against the current system time.
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction_at(Utc::now())
    }
}

impl fmt::Display for TimeToExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeToExpiry::Instant(expiry) => write!(f, "until {}", expiry.to_rfc3339()),
            TimeToExpiry::Duration {
                hours,
                minutes,
                seconds,
            } => write!(f, "{}h {}m {}s", hours, minutes, seconds),
        }
    }
}

/// Accepted naive formats, interpreted as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parses a user-supplied expiry instant.
///
/// Accepts RFC 3339 (`2025-03-28T08:00:00Z`), naive date-times
/// (`2025-03-28T08:00`, `2025-03-28 08:00`) interpreted as UTC, and bare
/// dates (`2025-03-28`) interpreted as midnight UTC.
///
/// # Errors
/// - `TimeError::Parse` if no format matches
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::parse_expiry;
///
/// let a = parse_expiry("2025-03-28T08:00:00Z").unwrap();
/// let b = parse_expiry("2025-03-28T08:00").unwrap();
/// assert_eq!(a, b);
///
/// assert!(parse_expiry("next friday").is_err());
/// ```
pub fn parse_expiry(s: &str) -> Result<DateTime<Utc>, TimeError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| TimeError::Parse(s.to_string()))
}
