//! Vanilla option terms.
//!
//! This module provides [`OptionTerms`], the validated bundle of market
//! and contract inputs every pricing call consumes. Terms are immutable
//! value types: the calibration layer derives updated copies (e.g. a new
//! dividend yield guess) rather than mutating shared state.

use num_traits::Float;

use super::error::InstrumentError;
use super::payoff::PayoffType;

/// Validated pricing inputs for a single vanilla option.
///
/// Bundles the underlying spot, contract strike and expiry, the
/// continuously-compounded risk-free rate and dividend yield, and the
/// payoff direction. Volatility is deliberately not part of the terms:
/// implied volatility solvers vary it per call against fixed terms.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use devol_models::instruments::{OptionTerms, PayoffType};
///
/// let terms = OptionTerms::new(105.0_f64, 100.0, 1.0, 0.03, 0.01, PayoffType::Put).unwrap();
/// assert_eq!(terms.strike(), 100.0);
///
/// // Invalid strike
/// let invalid = OptionTerms::new(105.0_f64, -100.0, 1.0, 0.03, 0.01, PayoffType::Put);
/// assert!(invalid.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionTerms<T: Float> {
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    dividend_yield: T,
    payoff: PayoffType,
}

impl<T: Float> OptionTerms<T> {
    /// Creates validated option terms.
    ///
    /// # Arguments
    /// * `spot` - Underlying spot price (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `expiry` - Time to expiry in years (must be positive)
    /// * `rate` - Continuously-compounded risk-free rate (must be finite)
    /// * `dividend_yield` - Continuous dividend yield (must be finite)
    /// * `payoff` - Call or put
    ///
    /// # Errors
    /// - `InstrumentError::InvalidSpot` if spot <= 0
    /// - `InstrumentError::InvalidStrike` if strike <= 0
    /// - `InstrumentError::InvalidExpiry` if expiry <= 0
    /// - `InstrumentError::InvalidParameter` if rate or dividend yield is
    ///   not finite
    pub fn new(
        spot: T,
        strike: T,
        expiry: T,
        rate: T,
        dividend_yield: T,
        payoff: PayoffType,
    ) -> Result<Self, InstrumentError> {
        let zero = T::zero();

        if spot <= zero || !spot.is_finite() {
            return Err(InstrumentError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if strike <= zero || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }

        if expiry <= zero || !expiry.is_finite() {
            return Err(InstrumentError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !rate.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: "rate must be finite".to_string(),
            });
        }

        if !dividend_yield.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: "dividend yield must be finite".to_string(),
            });
        }

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            dividend_yield,
            payoff,
        })
    }

    /// Returns the underlying spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the payoff type.
    #[inline]
    pub fn payoff(&self) -> PayoffType {
        self.payoff
    }

    /// Returns a copy of these terms with the payoff direction replaced.
    ///
    /// Used when pricing the call and put legs of a parity pair against
    /// identical market inputs.
    #[inline]
    pub fn with_payoff(mut self, payoff: PayoffType) -> Self {
        self.payoff = payoff;
        self
    }

    /// Returns a copy of these terms with the dividend yield replaced.
    ///
    /// The fixed-point calibration updates the yield guess every sweep;
    /// the caller is responsible for keeping the new value finite.
    #[inline]
    pub fn with_dividend_yield(mut self, dividend_yield: T) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Returns the model forward price `S·e^((r - q)·T)`.
    #[inline]
    pub fn forward(&self) -> T {
        self.spot * ((self.rate - self.dividend_yield) * self.expiry).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_terms() -> OptionTerms<f64> {
        OptionTerms::new(105.0, 100.0, 1.0, 0.03, 0.01, PayoffType::Put).unwrap()
    }

    #[test]
    fn test_new_valid_terms() {
        let terms = sample_terms();
        assert_eq!(terms.spot(), 105.0);
        assert_eq!(terms.strike(), 100.0);
        assert_eq!(terms.expiry(), 1.0);
        assert_eq!(terms.rate(), 0.03);
        assert_eq!(terms.dividend_yield(), 0.01);
        assert_eq!(terms.payoff(), PayoffType::Put);
    }

    #[test]
    fn test_new_invalid_spot() {
        let result = OptionTerms::new(-105.0_f64, 100.0, 1.0, 0.03, 0.01, PayoffType::Put);
        assert!(matches!(result, Err(InstrumentError::InvalidSpot { .. })));

        let result = OptionTerms::new(0.0_f64, 100.0, 1.0, 0.03, 0.01, PayoffType::Put);
        assert!(matches!(result, Err(InstrumentError::InvalidSpot { .. })));
    }

    #[test]
    fn test_new_invalid_strike() {
        let result = OptionTerms::new(105.0_f64, 0.0, 1.0, 0.03, 0.01, PayoffType::Call);
        assert!(matches!(result, Err(InstrumentError::InvalidStrike { .. })));
    }

    #[test]
    fn test_new_invalid_expiry() {
        let result = OptionTerms::new(105.0_f64, 100.0, 0.0, 0.03, 0.01, PayoffType::Call);
        assert!(matches!(result, Err(InstrumentError::InvalidExpiry { .. })));

        let result = OptionTerms::new(105.0_f64, 100.0, -1.0, 0.03, 0.01, PayoffType::Call);
        assert!(matches!(result, Err(InstrumentError::InvalidExpiry { .. })));
    }

    #[test]
    fn test_new_non_finite_rate() {
        let result = OptionTerms::new(105.0_f64, 100.0, 1.0, f64::NAN, 0.01, PayoffType::Call);
        assert!(matches!(
            result,
            Err(InstrumentError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_new_non_finite_dividend_yield() {
        let result = OptionTerms::new(
            105.0_f64,
            100.0,
            1.0,
            0.03,
            f64::INFINITY,
            PayoffType::Call,
        );
        assert!(matches!(
            result,
            Err(InstrumentError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_with_payoff() {
        let put = sample_terms();
        let call = put.with_payoff(PayoffType::Call);
        assert_eq!(call.payoff(), PayoffType::Call);
        assert_eq!(call.strike(), put.strike());
    }

    #[test]
    fn test_with_dividend_yield() {
        let terms = sample_terms().with_dividend_yield(0.025);
        assert_eq!(terms.dividend_yield(), 0.025);
    }

    #[test]
    fn test_forward() {
        let terms = sample_terms();
        // F = S·e^((r - q)·T) = 105·e^0.02
        assert_relative_eq!(terms.forward(), 105.0 * 0.02_f64.exp(), epsilon = 1e-12);
    }
}
