//! Integration tests for de-Americanisation calibration.
//!
//! These tests verify end-to-end functionality of the calibration layer:
//! the forward/yield fixed point on a published market scenario, full-chain
//! curve construction against a synthetic chain with a known smile, and
//! per-strike failure isolation.

use devol_calibration::calibrator::Deamericaniser;
use devol_calibration::chain::{ChainSlice, Expiry, MarketSnapshot, OptionQuote, ParityPair};
use devol_calibration::config::DeamericaniserConfig;
use devol_calibration::curve::CurveBuilder;
use devol_core::types::{Date, DayCountConvention};
use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
use devol_models::lattice::BinomialLattice;

// ============================================================================
// Golden Market Scenario
// ============================================================================

/// A listed equity chain anchor: spot 177.83, zero rate 5.482%, 127 days to
/// expiry, American 185-strike pair quoted at 7.625 (call) and 11.975 (put).
fn golden_chain() -> ChainSlice<f64> {
    let valuation = Date::from_ymd(2024, 3, 1).unwrap();
    let maturity = Date::from_ymd(2024, 7, 6).unwrap();
    ChainSlice::new(
        MarketSnapshot::new(177.83, valuation, 0.05482),
        Expiry::from_dates(valuation, maturity, DayCountConvention::ActualActual365),
        ParityPair::new(185.0, 7.625, 11.975),
        vec![
            OptionQuote::call(185.0, 7.625),
            OptionQuote::put(185.0, 11.975),
        ],
    )
}

/// Test the complete fixed point on the golden scenario at default settings.
#[test]
fn test_end_to_end_golden_forward_calibration() {
    let chain = golden_chain();

    // 127 calendar days between the chain dates
    assert!((chain.expiry.year_fraction() - 127.0 / 365.0).abs() < 1e-12);

    let result = Deamericaniser::<f64>::with_defaults()
        .calibrate(&chain.snapshot, &chain.expiry, &chain.parity_pair, 0.0001)
        .unwrap();

    // Converged forward and dividend yield
    assert!((result.forward() - 181.078).abs() < 1e-3);
    assert!((result.dividend_yield() - 0.0027987).abs() < 1e-5);
    assert!(result.iterations() <= 7);

    // Diagnostics are internally consistent
    let diagnostics = &result.diagnostics;
    assert_eq!(diagnostics.trace.len(), diagnostics.iterations);
    assert!(diagnostics.residual < 1e-6);
    let last = diagnostics.last_step().unwrap();
    assert_eq!(last.updated_yield, result.dividend_yield());
    assert_eq!(last.forward, result.forward());

    // First sweep observables
    let first = &diagnostics.trace[0];
    assert_eq!(first.iteration, 1);
    assert_eq!(first.yield_guess, 0.0001);
    assert!((first.call_vol - 0.221329).abs() < 1e-4);
    assert!((first.put_vol - 0.224753).abs() < 1e-4);
    assert!((first.european_call - 7.625).abs() < 1e-3);
    assert!((first.european_put - 11.4474).abs() < 1e-3);
    assert!((first.forward - 181.1040).abs() < 1e-3);
    assert!((first.updated_yield - 0.0023879).abs() < 1e-5);

    // At the fixed point the forward and yield satisfy the carry identity
    let spot = chain.snapshot.spot;
    let rate = chain.snapshot.rate;
    let year_fraction = chain.expiry.year_fraction();
    let implied_forward =
        spot * ((rate - result.dividend_yield()) * year_fraction).exp();
    assert!((implied_forward - result.forward()).abs() < 1e-9);
}

/// Test that the fast preset reproduces the golden scenario coarsely.
#[test]
fn test_golden_scenario_with_fast_preset() {
    let chain = golden_chain();
    let result = Deamericaniser::new(DeamericaniserConfig::<f64>::fast())
        .calibrate(&chain.snapshot, &chain.expiry, &chain.parity_pair, 0.0001)
        .unwrap();

    // The relaxed tolerance converges in fewer sweeps on a shallower
    // lattice, trading accuracy in the fourth decimal of the yield.
    assert!(result.iterations() <= 5);
    assert!((result.forward() - 181.078).abs() < 0.05);
    assert!((result.dividend_yield() - 0.0027987).abs() < 5e-4);
}

// ============================================================================
// Synthetic Chain Round Trip
// ============================================================================

const SPOT: f64 = 100.0;
const RATE: f64 = 0.03;
const EXPIRY: f64 = 0.5;
const TRUE_YIELD: f64 = 0.02;
const TRUE_VOL: f64 = 0.25;
const STEPS: usize = 200;

fn american_price(strike: f64, payoff: PayoffType) -> f64 {
    let lattice = BinomialLattice::new(STEPS);
    let terms = OptionTerms::new(SPOT, strike, EXPIRY, RATE, TRUE_YIELD, payoff).unwrap();
    lattice.price(&terms, TRUE_VOL, ExerciseStyle::American)
}

fn synthetic_chain() -> ChainSlice<f64> {
    let valuation = Date::from_ymd(2024, 3, 1).unwrap();
    let strikes = [90.0, 95.0, 100.0, 105.0, 110.0];
    let mut quotes = Vec::new();
    for &strike in &strikes {
        quotes.push(OptionQuote::call(strike, american_price(strike, PayoffType::Call)));
        quotes.push(OptionQuote::put(strike, american_price(strike, PayoffType::Put)));
    }
    ChainSlice::new(
        MarketSnapshot::new(SPOT, valuation, RATE),
        Expiry::from_year_fraction(EXPIRY),
        ParityPair::new(
            100.0,
            american_price(100.0, PayoffType::Call),
            american_price(100.0, PayoffType::Put),
        ),
        quotes,
    )
}

/// Test full-chain curve construction against generated American prices.
///
/// The chain is priced under a known flat volatility and dividend yield on
/// the same lattice depth the builder uses, which makes the true yield an
/// exact fixed point and the flat smile exactly recoverable up to
/// lattice-vs-closed-form discretisation error.
#[test]
fn test_synthetic_chain_round_trip() {
    let chain = synthetic_chain();
    let config = DeamericaniserConfig::<f64>::builder()
        .lattice_steps(STEPS)
        .build();

    let result = CurveBuilder::new(config).build(&chain, 0.0001).unwrap();

    // Forward and yield recovery
    assert!((result.forward_yield.dividend_yield - TRUE_YIELD).abs() < 1e-5);
    let true_forward = SPOT * ((RATE - TRUE_YIELD) * EXPIRY).exp();
    assert!((result.forward_yield.forward - true_forward).abs() < 1e-3);
    assert!(result.diagnostics.iterations <= 7);

    // Every quote converts and keeps its input position
    assert!(result.is_complete());
    assert_eq!(result.curve.len(), chain.quotes.len());
    for (point, quote) in result.curve.iter().zip(&chain.quotes) {
        assert_eq!(point.strike, quote.strike);
    }

    // The American leg inverts exactly; the European leg carries only
    // the lattice discretisation offset against the closed form.
    for point in result.curve.iter() {
        assert!((point.american_vol - TRUE_VOL).abs() < 1e-6);
        assert!((point.european_vol - TRUE_VOL).abs() < 2e-3);
    }

    // The de-Americanised smile stays flat across strikes.
    let european_vols: Vec<f64> = result.curve.iter().map(|p| p.european_vol).collect();
    let max = european_vols.iter().cloned().fold(f64::MIN, f64::max);
    let min = european_vols.iter().cloned().fold(f64::MAX, f64::min);
    assert!(max - min < 2e-3);
}

/// Test that a poisoned strike fails alone while the chain survives.
#[test]
fn test_end_to_end_failure_isolation() {
    let mut chain = synthetic_chain();
    // Quote the 95 call at a price no volatility on the bracket can reach.
    chain.quotes[2] = OptionQuote::call(95.0, 0.001);

    let config = DeamericaniserConfig::<f64>::builder()
        .lattice_steps(STEPS)
        .build();
    let result = CurveBuilder::new(config).build(&chain, 0.0001).unwrap();

    assert!(!result.is_complete());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.curve.len(), chain.quotes.len() - 1);

    let failure = &result.failures[0];
    assert_eq!(failure.strike, 95.0);
    assert_eq!(failure.payoff, PayoffType::Call);
    assert!(failure.error.is_implied_vol());

    // The calibration itself and the healthy strikes are untouched.
    assert!((result.forward_yield.dividend_yield - TRUE_YIELD).abs() < 1e-5);
    for point in result.curve.iter() {
        assert!((point.american_vol - TRUE_VOL).abs() < 1e-6);
    }
}

/// Test that the parallel build path reproduces the sequential one.
#[cfg(feature = "parallel")]
#[test]
fn test_parallel_chain_build_matches_sequential() {
    let chain = synthetic_chain();
    let config = DeamericaniserConfig::<f64>::builder()
        .lattice_steps(STEPS)
        .build();
    let builder = CurveBuilder::new(config);

    let sequential = builder.build(&chain, 0.0001).unwrap();
    let parallel = builder.build_parallel(&chain, 0.0001).unwrap();

    assert_eq!(sequential.curve, parallel.curve);
    assert_eq!(sequential.forward_yield, parallel.forward_yield);
    assert_eq!(sequential.diagnostics, parallel.diagnostics);
}
