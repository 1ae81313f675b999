//! Option chain inputs for a single expiry.
//!
//! A calibration run consumes one [`ChainSlice`]: the market snapshot,
//! the expiry, the parity pair that seeds the forward/yield fixed point,
//! and the quote list to de-Americanise. All types here are read-only
//! value types; [`ChainSlice::validate`] is the single gate that enforces
//! the positivity and shape invariants before any solving starts.

use devol_core::types::{Date, DayCountConvention};
use devol_models::instruments::PayoffType;
use num_traits::Float;

use crate::error::CalibrationError;

/// Immutable market state shared by every quote of a chain.
///
/// # Examples
///
/// ```
/// use devol_calibration::chain::MarketSnapshot;
/// use devol_core::types::Date;
///
/// let valuation = Date::from_ymd(2024, 3, 1).unwrap();
/// let snapshot = MarketSnapshot::new(177.83_f64, valuation, 0.05482);
/// assert_eq!(snapshot.spot, 177.83);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot<T: Float> {
    /// Underlying spot price
    pub spot: T,
    /// Valuation date the chain was observed on
    pub valuation_date: Date,
    /// Continuously-compounded zero rate to the chain expiry
    pub rate: T,
}

impl<T: Float> MarketSnapshot<T> {
    /// Create a market snapshot.
    pub fn new(spot: T, valuation_date: Date, rate: T) -> Self {
        Self {
            spot,
            valuation_date,
            rate,
        }
    }
}

/// One observed American option price.
///
/// # Examples
///
/// ```
/// use devol_calibration::chain::OptionQuote;
/// use devol_models::instruments::PayoffType;
///
/// let quote = OptionQuote::put(185.0_f64, 11.975);
/// assert_eq!(quote.payoff, PayoffType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote<T: Float> {
    /// Strike price
    pub strike: T,
    /// Call or put
    pub payoff: PayoffType,
    /// Observed American market price
    pub price: T,
}

impl<T: Float> OptionQuote<T> {
    /// Create a quote with an explicit payoff side.
    pub fn new(strike: T, payoff: PayoffType, price: T) -> Self {
        Self {
            strike,
            payoff,
            price,
        }
    }

    /// Create a call quote.
    pub fn call(strike: T, price: T) -> Self {
        Self::new(strike, PayoffType::Call, price)
    }

    /// Create a put quote.
    pub fn put(strike: T, price: T) -> Self {
        Self::new(strike, PayoffType::Put, price)
    }
}

/// The anchor strike quoted on both sides.
///
/// The de-Americanisation fixed point reads the implied forward off
/// put-call parity, which needs an American call and an American put
/// at the same strike. Chains carry exactly one such pair, chosen by
/// the caller as the most liquid strike of the expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParityPair<T: Float> {
    /// Shared strike of the pair
    pub strike: T,
    /// American call price at the strike
    pub call_price: T,
    /// American put price at the strike
    pub put_price: T,
}

impl<T: Float> ParityPair<T> {
    /// Create a parity pair.
    pub fn new(strike: T, call_price: T, put_price: T) -> Self {
        Self {
            strike,
            call_price,
            put_price,
        }
    }
}

/// Time to expiry, optionally anchored to a calendar date.
///
/// Built either directly from a year fraction or from a valuation/maturity
/// date pair under a [`DayCountConvention`]. The year fraction is what the
/// pricers consume; the maturity date, when present, is provenance.
///
/// # Examples
///
/// ```
/// use devol_calibration::chain::Expiry;
/// use devol_core::types::{Date, DayCountConvention};
///
/// let expiry = Expiry::from_year_fraction(127.0_f64 / 365.0);
/// assert!(expiry.maturity().is_none());
///
/// let valuation = Date::from_ymd(2024, 3, 1).unwrap();
/// let maturity = Date::from_ymd(2024, 7, 6).unwrap();
/// let dated: Expiry<f64> =
///     Expiry::from_dates(valuation, maturity, DayCountConvention::ActualActual365);
/// assert!((dated.year_fraction() - expiry.year_fraction()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expiry<T: Float> {
    maturity: Option<Date>,
    year_fraction: T,
}

impl<T: Float> Expiry<T> {
    /// Create an expiry from a year fraction alone.
    pub fn from_year_fraction(year_fraction: T) -> Self {
        Self {
            maturity: None,
            year_fraction,
        }
    }

    /// Create an expiry from a date pair under a day-count convention.
    pub fn from_dates(valuation: Date, maturity: Date, convention: DayCountConvention) -> Self {
        let year_fraction = T::from(convention.year_fraction(valuation, maturity)).unwrap();
        Self {
            maturity: Some(maturity),
            year_fraction,
        }
    }

    /// Time to expiry in years.
    pub fn year_fraction(&self) -> T {
        self.year_fraction
    }

    /// Maturity date, when the expiry was built from dates.
    pub fn maturity(&self) -> Option<Date> {
        self.maturity
    }
}

/// One expiry's complete calibration input.
///
/// # Examples
///
/// ```
/// use devol_calibration::chain::{ChainSlice, Expiry, MarketSnapshot, OptionQuote, ParityPair};
/// use devol_core::types::Date;
///
/// let valuation = Date::from_ymd(2024, 3, 1).unwrap();
/// let chain = ChainSlice::new(
///     MarketSnapshot::new(177.83_f64, valuation, 0.05482),
///     Expiry::from_year_fraction(127.0 / 365.0),
///     ParityPair::new(185.0, 7.625, 11.975),
///     vec![OptionQuote::call(185.0, 7.625), OptionQuote::put(185.0, 11.975)],
/// );
/// assert!(chain.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainSlice<T: Float> {
    /// Market state the chain was observed under
    pub snapshot: MarketSnapshot<T>,
    /// Expiry shared by every quote
    pub expiry: Expiry<T>,
    /// Anchor pair seeding the forward/yield fixed point
    pub parity_pair: ParityPair<T>,
    /// Quotes to convert, in caller order
    pub quotes: Vec<OptionQuote<T>>,
}

impl<T: Float> ChainSlice<T> {
    /// Create a chain slice.
    pub fn new(
        snapshot: MarketSnapshot<T>,
        expiry: Expiry<T>,
        parity_pair: ParityPair<T>,
        quotes: Vec<OptionQuote<T>>,
    ) -> Self {
        Self {
            snapshot,
            expiry,
            parity_pair,
            quotes,
        }
    }

    /// Check every positivity and shape invariant of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidChain`] naming the first violated
    /// invariant: non-positive or non-finite spot, non-finite rate,
    /// non-positive expiry, non-positive parity strikes or prices, an empty
    /// quote list, or any quote with a non-positive strike or price.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let zero = T::zero();

        if self.snapshot.spot <= zero || !self.snapshot.spot.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "spot must be positive and finite, got {}",
                as_f64(self.snapshot.spot)
            )));
        }

        if !self.snapshot.rate.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "rate must be finite, got {}",
                as_f64(self.snapshot.rate)
            )));
        }

        let year_fraction = self.expiry.year_fraction();
        if year_fraction <= zero || !year_fraction.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "expiry must be positive and finite, got {}",
                as_f64(year_fraction)
            )));
        }

        if self.parity_pair.strike <= zero || !self.parity_pair.strike.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "parity strike must be positive and finite, got {}",
                as_f64(self.parity_pair.strike)
            )));
        }

        if self.parity_pair.call_price <= zero || !self.parity_pair.call_price.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "parity call price must be positive and finite, got {}",
                as_f64(self.parity_pair.call_price)
            )));
        }

        if self.parity_pair.put_price <= zero || !self.parity_pair.put_price.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "parity put price must be positive and finite, got {}",
                as_f64(self.parity_pair.put_price)
            )));
        }

        if self.quotes.is_empty() {
            return Err(CalibrationError::invalid_chain("no quotes supplied"));
        }

        for quote in &self.quotes {
            if quote.strike <= zero || !quote.strike.is_finite() {
                return Err(CalibrationError::invalid_chain(format!(
                    "quote strike must be positive and finite, got {}",
                    as_f64(quote.strike)
                )));
            }
            if quote.price <= zero || !quote.price.is_finite() {
                return Err(CalibrationError::invalid_chain(format!(
                    "{} price at strike {} must be positive and finite, got {}",
                    quote.payoff,
                    as_f64(quote.strike),
                    as_f64(quote.price)
                )));
            }
        }

        Ok(())
    }
}

fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_chain() -> ChainSlice<f64> {
        let valuation = Date::from_ymd(2024, 3, 1).unwrap();
        ChainSlice::new(
            MarketSnapshot::new(177.83, valuation, 0.05482),
            Expiry::from_year_fraction(127.0 / 365.0),
            ParityPair::new(185.0, 7.625, 11.975),
            vec![
                OptionQuote::call(175.0, 12.30),
                OptionQuote::put(185.0, 11.975),
            ],
        )
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_quote_constructors() {
        let call = OptionQuote::call(100.0_f64, 5.0);
        assert_eq!(call.payoff, PayoffType::Call);
        assert_eq!(call.strike, 100.0);
        assert_eq!(call.price, 5.0);

        let put = OptionQuote::put(100.0_f64, 4.0);
        assert_eq!(put.payoff, PayoffType::Put);

        let explicit = OptionQuote::new(100.0_f64, PayoffType::Call, 5.0);
        assert_eq!(explicit, call);
    }

    #[test]
    fn test_expiry_from_year_fraction() {
        let expiry = Expiry::from_year_fraction(0.5_f64);
        assert_eq!(expiry.year_fraction(), 0.5);
        assert!(expiry.maturity().is_none());
    }

    #[test]
    fn test_expiry_from_dates_act365() {
        let valuation = Date::from_ymd(2024, 3, 1).unwrap();
        let maturity = Date::from_ymd(2024, 7, 6).unwrap();
        let expiry: Expiry<f64> =
            Expiry::from_dates(valuation, maturity, DayCountConvention::ActualActual365);

        // 127 calendar days between the two dates
        assert!((expiry.year_fraction() - 127.0 / 365.0).abs() < 1e-12);
        assert_eq!(expiry.maturity(), Some(maturity));
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_valid_chain_passes() {
        assert!(valid_chain().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        let mut chain = valid_chain();
        chain.snapshot.spot = -1.0;
        let err = chain.validate().unwrap_err();
        assert!(err.is_invalid_chain());
        assert!(format!("{}", err).contains("spot"));
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let mut chain = valid_chain();
        chain.snapshot.rate = f64::NAN;
        let err = chain.validate().unwrap_err();
        assert!(format!("{}", err).contains("rate"));
    }

    #[test]
    fn test_rejects_non_positive_expiry() {
        let mut chain = valid_chain();
        chain.expiry = Expiry::from_year_fraction(0.0);
        let err = chain.validate().unwrap_err();
        assert!(format!("{}", err).contains("expiry"));
    }

    #[test]
    fn test_rejects_bad_parity_pair() {
        let mut chain = valid_chain();
        chain.parity_pair.call_price = 0.0;
        let err = chain.validate().unwrap_err();
        assert!(format!("{}", err).contains("parity call price"));

        let mut chain = valid_chain();
        chain.parity_pair.put_price = f64::INFINITY;
        let err = chain.validate().unwrap_err();
        assert!(format!("{}", err).contains("parity put price"));

        let mut chain = valid_chain();
        chain.parity_pair.strike = -185.0;
        let err = chain.validate().unwrap_err();
        assert!(format!("{}", err).contains("parity strike"));
    }

    #[test]
    fn test_rejects_empty_quotes() {
        let mut chain = valid_chain();
        chain.quotes.clear();
        let err = chain.validate().unwrap_err();
        assert!(format!("{}", err).contains("no quotes"));
    }

    #[test]
    fn test_rejects_bad_quote() {
        let mut chain = valid_chain();
        chain.quotes[1].price = -2.0;
        let err = chain.validate().unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("put"));
        assert!(msg.contains("185"));
    }

    #[test]
    fn test_chain_clone_eq() {
        let chain = valid_chain();
        assert_eq!(chain.clone(), chain);
    }
}
