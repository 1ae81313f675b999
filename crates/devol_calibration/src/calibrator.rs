//! De-Americanisation fixed-point calibrator.
//!
//! Recovers the implied forward and continuous dividend yield of one expiry
//! from an American call/put pair at a single strike.
//!
//! # Algorithm
//!
//! Starting from a yield seed `q0`, each sweep:
//!
//! ```text
//! 1. imply the American call and put volatilities at the anchor strike
//!    under the current yield guess (lattice bisection)
//! 2. re-price both options as European on the same lattice at those
//!    volatilities
//! 3. read the forward off parity: F = e^(rT)·(C_eur - P_eur) + K
//! 4. update the yield:            q = r + ln(S0/F)/T
//! ```
//!
//! repeating until the absolute yield change falls below tolerance. Pricing
//! the American inversion and the European re-pricing on the same lattice
//! cancels the discretisation error between them, which is what makes the
//! equivalent European prices usable in closed-form parity.
//!
//! # Convergence
//!
//! The map contracts at roughly the early-exercise premium's sensitivity to
//! the carry, around 0.15 per sweep for near-dated equity chains, so
//! well-posed inputs converge in a handful of iterations. Every sweep is
//! recorded in the diagnostic trace and mirrored as a `tracing` event.

use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
use devol_models::lattice::{self, BinomialLattice};
use num_traits::Float;

use crate::chain::{Expiry, MarketSnapshot, ParityPair};
use crate::config::DeamericaniserConfig;
use crate::error::CalibrationError;
use crate::result::{CalibratedForward, CalibrationDiagnostics, FixedPointStep, ForwardYieldPair};

/// Fixed-point calibrator for the implied forward and dividend yield.
///
/// # Examples
///
/// ```
/// use devol_calibration::calibrator::Deamericaniser;
/// use devol_calibration::chain::{Expiry, MarketSnapshot, ParityPair};
/// use devol_calibration::config::DeamericaniserConfig;
/// use devol_core::types::Date;
/// use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
/// use devol_models::lattice::BinomialLattice;
///
/// // Synthetic pair priced on the same lattice depth under a known yield
/// let lattice = BinomialLattice::new(100);
/// let terms = OptionTerms::new(100.0_f64, 100.0, 0.5, 0.03, 0.02, PayoffType::Call).unwrap();
/// let call = lattice.price(&terms, 0.25, ExerciseStyle::American);
/// let put = lattice.price(&terms.with_payoff(PayoffType::Put), 0.25, ExerciseStyle::American);
///
/// let config = DeamericaniserConfig::<f64>::builder().lattice_steps(100).build();
/// let valuation = Date::from_ymd(2024, 3, 1).unwrap();
/// let result = Deamericaniser::new(config)
///     .calibrate(
///         &MarketSnapshot::new(100.0, valuation, 0.03),
///         &Expiry::from_year_fraction(0.5),
///         &ParityPair::new(100.0, call, put),
///         0.0001,
///     )
///     .unwrap();
///
/// assert!((result.dividend_yield() - 0.02).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct Deamericaniser<T: Float> {
    /// Calibration configuration
    config: DeamericaniserConfig<T>,
}

impl<T: Float> Deamericaniser<T> {
    /// Create a new calibrator.
    pub fn new(config: DeamericaniserConfig<T>) -> Self {
        Self { config }
    }

    /// Create a calibrator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DeamericaniserConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &DeamericaniserConfig<T> {
        &self.config
    }

    /// Calibrate the implied forward and dividend yield for one expiry.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - Spot, valuation date and zero rate
    /// * `expiry` - Time to expiry shared by the pair
    /// * `pair` - American call and put prices at the anchor strike
    /// * `initial_yield` - Dividend yield seed `q0` (e.g. `0.0001`)
    ///
    /// # Returns
    ///
    /// * `Ok(calibrated)` - Forward/yield pair with the full iteration trace
    /// * `Err(e)` - Invalid inputs, a failed volatility solve, or an
    ///   exhausted iteration budget
    pub fn calibrate(
        &self,
        snapshot: &MarketSnapshot<T>,
        expiry: &Expiry<T>,
        pair: &ParityPair<T>,
        initial_yield: T,
    ) -> Result<CalibratedForward<T>, CalibrationError> {
        let zero = T::zero();
        let spot = snapshot.spot;
        let rate = snapshot.rate;
        let year_fraction = expiry.year_fraction();
        let strike = pair.strike;

        if pair.call_price <= zero || !pair.call_price.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "parity call price must be positive and finite, got {}",
                as_f64(pair.call_price)
            )));
        }
        if pair.put_price <= zero || !pair.put_price.is_finite() {
            return Err(CalibrationError::invalid_chain(format!(
                "parity put price must be positive and finite, got {}",
                as_f64(pair.put_price)
            )));
        }

        // Validates spot, strike, expiry, rate and the yield seed in one place.
        let base_terms = OptionTerms::new(
            spot,
            strike,
            year_fraction,
            rate,
            initial_yield,
            PayoffType::Call,
        )
        .map_err(|e| CalibrationError::invalid_chain(e.to_string()))?;

        let lattice = BinomialLattice::new(self.config.lattice_steps);
        let growth = (rate * year_fraction).exp();

        let mut yield_guess = initial_yield;
        // Seed so the first sweep's forward change is well defined.
        let mut previous_forward = spot * ((rate - yield_guess) * year_fraction).exp();
        let mut trace: Vec<FixedPointStep<T>> = Vec::new();

        for iteration in 1..=self.config.fixed_point_max_iterations {
            let call_terms = base_terms.with_dividend_yield(yield_guess);
            let put_terms = call_terms.with_payoff(PayoffType::Put);

            let call_vol =
                self.implied_american_vol(&lattice, &call_terms, pair.call_price, year_fraction)?;
            let put_vol =
                self.implied_american_vol(&lattice, &put_terms, pair.put_price, year_fraction)?;

            let european_call = lattice.price(&call_terms, call_vol, ExerciseStyle::European);
            let european_put = lattice.price(&put_terms, put_vol, ExerciseStyle::European);

            let forward = growth * (european_call - european_put) + strike;
            let updated_yield = rate + (spot / forward).ln() / year_fraction;

            let forward_change = (forward - previous_forward).abs();
            let yield_change = (updated_yield - yield_guess).abs();

            tracing::debug!(
                iteration,
                yield_guess = as_f64(yield_guess),
                call_vol = as_f64(call_vol),
                put_vol = as_f64(put_vol),
                forward = as_f64(forward),
                updated_yield = as_f64(updated_yield),
                yield_change = as_f64(yield_change),
                "de-Americanisation sweep"
            );

            trace.push(FixedPointStep {
                iteration,
                yield_guess,
                call_vol,
                put_vol,
                european_call,
                european_put,
                forward,
                updated_yield,
                forward_change,
                yield_change,
            });

            previous_forward = forward;
            yield_guess = updated_yield;

            if yield_change < self.config.fixed_point_tolerance {
                tracing::info!(
                    iterations = iteration,
                    forward = as_f64(forward),
                    dividend_yield = as_f64(updated_yield),
                    "de-Americanisation converged"
                );
                return Ok(CalibratedForward::new(
                    ForwardYieldPair::new(forward, updated_yield),
                    CalibrationDiagnostics::new(iteration, yield_change, trace),
                ));
            }
        }

        let delta = trace
            .last()
            .map(|step| as_f64(step.yield_change))
            .unwrap_or(f64::NAN);
        tracing::warn!(
            strike = as_f64(strike),
            expiry = as_f64(year_fraction),
            iterations = self.config.fixed_point_max_iterations,
            delta,
            "de-Americanisation budget exhausted"
        );
        Err(CalibrationError::FixedPointExhausted {
            strike: as_f64(strike),
            expiry: as_f64(year_fraction),
            iterations: self.config.fixed_point_max_iterations,
            delta,
        })
    }

    /// Imply the American volatility of one leg, wrapping failures with
    /// the quote that triggered them.
    fn implied_american_vol(
        &self,
        lattice: &BinomialLattice,
        terms: &OptionTerms<T>,
        market_price: T,
        expiry: T,
    ) -> Result<T, CalibrationError> {
        lattice::implied_volatility(
            lattice,
            terms,
            ExerciseStyle::American,
            market_price,
            self.config.bracket,
            &self.config.bisection,
        )
        .map(|result| result.root)
        .map_err(|error| {
            CalibrationError::from_lattice(error, terms.payoff(), terms.strike(), expiry)
        })
    }
}

impl<T: Float> Default for Deamericaniser<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

// ============================================================================
// Tests
// ============================================================================
