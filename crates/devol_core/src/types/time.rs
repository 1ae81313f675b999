//! Time types and day count conventions for option expiry handling.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Industry-standard day count conventions
//! - Year fraction calculations for converting expiry dates to maturities
//!
//! # Examples
//!
//! ```
//! use devol_core::types::time::{Date, DayCountConvention};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // Calculate time to expiry using ACT/365
//! let yf = DayCountConvention::ActualActual365.year_fraction(valuation, expiry);
//! assert!((yf - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and standard date arithmetic.
/// Used for valuation dates and option expiry dates throughout the
/// calibration engine.
///
/// # Examples
///
/// ```
/// use devol_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Arguments
    /// * `year` - Year (e.g., 2024)
    /// * `month` - Month (1-12)
    /// * `day` - Day (1-31, depending on month)
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use devol_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 6, 15).unwrap();
    ///
    /// // Leap year February 29th
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    ///
    /// // Invalid date returns error
    /// let invalid = Date::from_ymd(2024, 2, 30);
    /// assert!(invalid.is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Arguments
    /// * `s` - Date string in ISO 8601 format
    ///
    /// # Returns
    /// `Ok(Date)` if parsing succeeds, `Err(DateError::ParseError)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use devol_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// let invalid = Date::parse("not-a-date");
    /// assert!(invalid.is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate.
    ///
    /// Use this method when you need access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// Controls how the gap between valuation date and expiry date is
/// converted into the year fraction `T` used by the pricing models.
///
/// # Variants
/// - `ActualActual365`: Actual days / 365 (standard for listed equity options)
/// - `ActualActual360`: Actual days / 360 (common in money market instruments)
/// - `Thirty360`: Each month treated as 30 days, year as 360 days
///
/// # Usage
///
/// ```
/// use devol_core::types::time::{Date, DayCountConvention};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 7, 1).unwrap();
///
/// let act_365 = DayCountConvention::ActualActual365;
/// let year_fraction = act_365.year_fraction(start, end);
/// // 182 days / 365.0 ≈ 0.4986
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    ///
    /// Used in:
    /// - Most derivatives markets
    /// - Listed equity option chains
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ///
    /// Used in:
    /// - Money market instruments
    /// - LIBOR-based instruments
    ActualActual360,

    /// 30/360 US Bond Basis
    ///
    /// Each month is treated as having 30 days, and the year as 360 days.
    Thirty360,
}

impl Default for DayCountConvention {
    /// Actual/365, the convention quoted equity option chains assume.
    fn default() -> Self {
        DayCountConvention::ActualActual365
    }
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use devol_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::ActualActual360.name(), "ACT/360");
    /// assert_eq!(DayCountConvention::Thirty360.name(), "30/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculate year fraction between two dates.
    ///
    /// Returns negative values when `start > end` instead of panicking,
    /// so the sign indicates direction. Callers that require a strictly
    /// positive time to expiry validate the result themselves.
    ///
    /// # Arguments
    /// * `start` - Start date
    /// * `end` - End date
    ///
    /// # Returns
    /// Year fraction as f64 (e.g., 0.5 for 6 months, 1.0 for 1 year).
    ///
    /// # Examples
    ///
    /// ```
    /// use devol_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// let yf = DayCountConvention::ActualActual365.year_fraction(start, end);
    /// assert!((yf - 0.4986).abs() < 0.001);
    ///
    /// // Reversed dates return a negative value
    /// let yf_neg = DayCountConvention::ActualActual365.year_fraction(end, start);
    /// assert!((yf_neg + 0.4986).abs() < 0.001);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        let days = end - start; // Returns i64, can be negative

        match self {
            DayCountConvention::ActualActual365 => days as f64 / 365.0,
            DayCountConvention::ActualActual360 => days as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                // For 30/360 the month adjustments assume start <= end
                let (start_inner, end_inner, sign) = if start <= end {
                    (start.into_inner(), end.into_inner(), 1.0)
                } else {
                    (end.into_inner(), start.into_inner(), -1.0)
                };

                let y1 = start_inner.year();
                let m1 = start_inner.month();
                let d1 = start_inner.day();

                let y2 = end_inner.year();
                let m2 = end_inner.month();
                let d2 = end_inner.day();

                // 30/360 US adjustments
                let d1_adj = if d1 == 31 { 30 } else { d1 };
                let d2_adj = if d2 == 31 && d1_adj == 30 { 30 } else { d2 };

                let days_30_360 = 360 * (y2 - y1)
                    + 30 * (m2 as i32 - m1 as i32)
                    + (d2_adj as i32 - d1_adj as i32);
                sign * days_30_360 as f64 / 360.0
            }
        }
    }
}
