//! Volatility curve construction across a chain's strikes.
//!
//! Once the forward and dividend yield of an expiry are calibrated, every
//! quote of the chain is converted independently through the same pipeline:
//!
//! ```text
//! American quote -> American implied vol   (lattice bisection)
//!                -> equivalent European price at that vol (same lattice)
//!                -> European implied vol    (Black-Scholes Newton)
//! ```
//!
//! A strike that fails any stage is recorded as a [`StrikeFailure`] and the
//! remaining strikes continue; the output curve preserves the input quote
//! order. The curve is complete or its gaps are explicitly marked, never
//! silently dropped.

use devol_models::analytical;
use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
use devol_models::lattice::{self, BinomialLattice};
use num_traits::Float;

use crate::calibrator::Deamericaniser;
use crate::chain::{ChainSlice, OptionQuote};
use crate::config::DeamericaniserConfig;
use crate::error::CalibrationError;
use crate::result::{CalibratedForward, CalibrationDiagnostics, ForwardYieldPair};

/// One strike's American and de-Americanised European volatilities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint<T: Float> {
    /// Strike price
    pub strike: T,
    /// American implied volatility of the raw quote
    pub american_vol: T,
    /// European implied volatility after de-Americanisation
    pub european_vol: T,
}

/// An ordered volatility curve for one expiry.
///
/// Points appear in the order their quotes were supplied; strikes that
/// failed conversion are absent here and recorded on the build result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityCurve<T: Float> {
    points: Vec<CurvePoint<T>>,
}

impl<T: Float> VolatilityCurve<T> {
    /// Create a curve from converted points.
    pub fn new(points: Vec<CurvePoint<T>>) -> Self {
        Self { points }
    }

    /// The converted points, in input quote order.
    pub fn points(&self) -> &[CurvePoint<T>] {
        &self.points
    }

    /// Number of converted points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no quote converted.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, CurvePoint<T>> {
        self.points.iter()
    }
}

/// A quote the builder could not convert, with the reason.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeFailure {
    /// Strike of the failed quote
    pub strike: f64,
    /// Payoff side of the failed quote
    pub payoff: PayoffType,
    /// Why the conversion failed
    pub error: CalibrationError,
}

/// Output of one chain's curve build.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveBuildResult<T: Float> {
    /// Calibrated forward and dividend yield of the expiry
    pub forward_yield: ForwardYieldPair<T>,
    /// Converted volatility points, in input order
    pub curve: VolatilityCurve<T>,
    /// Quotes that failed conversion, with reasons
    pub failures: Vec<StrikeFailure>,
    /// Fixed-point convergence record of the calibration
    pub diagnostics: CalibrationDiagnostics<T>,
}

impl<T: Float> CurveBuildResult<T> {
    /// Whether every quote converted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds de-Americanised volatility curves for one expiry at a time.
///
/// # Examples
///
/// ```
/// use devol_calibration::chain::{ChainSlice, Expiry, MarketSnapshot, OptionQuote, ParityPair};
/// use devol_calibration::config::DeamericaniserConfig;
/// use devol_calibration::curve::CurveBuilder;
/// use devol_core::types::Date;
/// use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
/// use devol_models::lattice::BinomialLattice;
///
/// // Synthetic chain priced on the build lattice under a known yield
/// let lattice = BinomialLattice::new(100);
/// let terms = OptionTerms::new(100.0_f64, 100.0, 0.5, 0.03, 0.02, PayoffType::Call).unwrap();
/// let call = lattice.price(&terms, 0.25, ExerciseStyle::American);
/// let put = lattice.price(&terms.with_payoff(PayoffType::Put), 0.25, ExerciseStyle::American);
///
/// let valuation = Date::from_ymd(2024, 3, 1).unwrap();
/// let chain = ChainSlice::new(
///     MarketSnapshot::new(100.0, valuation, 0.03),
///     Expiry::from_year_fraction(0.5),
///     ParityPair::new(100.0, call, put),
///     vec![OptionQuote::call(100.0, call)],
/// );
///
/// let config = DeamericaniserConfig::<f64>::builder().lattice_steps(100).build();
/// let result = CurveBuilder::new(config).build(&chain, 0.0001).unwrap();
/// assert!(result.is_complete());
/// assert!((result.curve.points()[0].american_vol - 0.25).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct CurveBuilder<T: Float> {
    /// Calibration configuration
    config: DeamericaniserConfig<T>,
}

impl<T: Float> CurveBuilder<T> {
    /// Create a new curve builder.
    pub fn new(config: DeamericaniserConfig<T>) -> Self {
        Self { config }
    }

    /// Create a curve builder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DeamericaniserConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &DeamericaniserConfig<T> {
        &self.config
    }

    /// Build the volatility curve for one chain.
    ///
    /// # Arguments
    ///
    /// * `chain` - The expiry's snapshot, parity pair and quotes
    /// * `initial_yield` - Dividend yield seed for the fixed point
    ///
    /// # Returns
    ///
    /// * `Ok(result)` - Curve with per-strike failures explicitly recorded
    /// * `Err(e)` - Chain validation or forward calibration failed; nothing
    ///   about the expiry is usable in that case
    pub fn build(
        &self,
        chain: &ChainSlice<T>,
        initial_yield: T,
    ) -> Result<CurveBuildResult<T>, CalibrationError> {
        chain.validate()?;
        let calibrated = self.calibrate_pair(chain, initial_yield)?;

        let lattice = BinomialLattice::new(self.config.lattice_steps);
        let dividend_yield = calibrated.dividend_yield();
        let outcomes: Vec<Result<CurvePoint<T>, StrikeFailure>> = chain
            .quotes
            .iter()
            .map(|quote| self.convert_quote(&lattice, chain, dividend_yield, quote))
            .collect();

        Ok(Self::assemble(calibrated, outcomes))
    }

    /// Build the volatility curve, converting strikes in parallel.
    ///
    /// Behaves exactly as [`CurveBuilder::build`]; the forward calibration
    /// stays sequential and only the per-strike conversion is distributed.
    /// The output preserves input quote order.
    #[cfg(feature = "parallel")]
    pub fn build_parallel(
        &self,
        chain: &ChainSlice<T>,
        initial_yield: T,
    ) -> Result<CurveBuildResult<T>, CalibrationError>
    where
        T: Send + Sync,
    {
        use rayon::prelude::*;

        chain.validate()?;
        let calibrated = self.calibrate_pair(chain, initial_yield)?;

        let lattice = BinomialLattice::new(self.config.lattice_steps);
        let dividend_yield = calibrated.dividend_yield();
        let outcomes: Vec<Result<CurvePoint<T>, StrikeFailure>> = chain
            .quotes
            .par_iter()
            .map(|quote| self.convert_quote(&lattice, chain, dividend_yield, quote))
            .collect();

        Ok(Self::assemble(calibrated, outcomes))
    }

    /// Calibrate the forward/yield pair off the chain's anchor strike.
    fn calibrate_pair(
        &self,
        chain: &ChainSlice<T>,
        initial_yield: T,
    ) -> Result<CalibratedForward<T>, CalibrationError> {
        Deamericaniser::new(self.config).calibrate(
            &chain.snapshot,
            &chain.expiry,
            &chain.parity_pair,
            initial_yield,
        )
    }

    /// Convert one quote through the de-Americanisation pipeline.
    fn convert_quote(
        &self,
        lattice: &BinomialLattice,
        chain: &ChainSlice<T>,
        dividend_yield: T,
        quote: &OptionQuote<T>,
    ) -> Result<CurvePoint<T>, StrikeFailure> {
        let year_fraction = chain.expiry.year_fraction();
        let terms = OptionTerms::new(
            chain.snapshot.spot,
            quote.strike,
            year_fraction,
            chain.snapshot.rate,
            dividend_yield,
            quote.payoff,
        )
        .map_err(|e| fail(quote, CalibrationError::invalid_chain(e.to_string())))?;

        let american = lattice::implied_volatility(
            lattice,
            &terms,
            ExerciseStyle::American,
            quote.price,
            self.config.bracket,
            &self.config.bisection,
        )
        .map_err(|e| {
            fail(
                quote,
                CalibrationError::from_lattice(e, quote.payoff, quote.strike, year_fraction),
            )
        })?;

        let equivalent_price = lattice.price(&terms, american.root, ExerciseStyle::European);

        let european = analytical::implied_volatility(
            &terms,
            equivalent_price,
            self.config.newton_guess,
            &self.config.newton,
        )
        .map_err(|e| {
            fail(
                quote,
                CalibrationError::from_analytical(e, quote.payoff, quote.strike, year_fraction),
            )
        })?;

        Ok(CurvePoint {
            strike: quote.strike,
            american_vol: american.root,
            european_vol: european.root,
        })
    }

    /// Partition conversion outcomes into the final build result.
    fn assemble(
        calibrated: CalibratedForward<T>,
        outcomes: Vec<Result<CurvePoint<T>, StrikeFailure>>,
    ) -> CurveBuildResult<T> {
        let mut points = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(point) => points.push(point),
                Err(failure) => failures.push(failure),
            }
        }

        tracing::info!(
            converted = points.len(),
            failed = failures.len(),
            "volatility curve built"
        );

        CurveBuildResult {
            forward_yield: calibrated.forward_yield,
            curve: VolatilityCurve::new(points),
            failures,
            diagnostics: calibrated.diagnostics,
        }
    }
}

impl<T: Float> Default for CurveBuilder<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Record a failed quote and emit the matching warning event.
fn fail<T: Float>(quote: &OptionQuote<T>, error: CalibrationError) -> StrikeFailure {
    let strike = quote.strike.to_f64().unwrap_or(f64::NAN);
    tracing::warn!(
        strike,
        payoff = %quote.payoff,
        error = %error,
        "strike conversion failed"
    );
    StrikeFailure {
        strike,
        payoff: quote.payoff,
        error,
    }
}

// ============================================================================
// Tests
// ============================================================================
