//! Cox-Ross-Rubinstein binomial lattice pricing.
//!
//! # Model
//!
//! The lattice discretises geometric Brownian motion over `N` steps of
//! length `Δt = T/N` with the Cox-Ross-Rubinstein (1979) parameterisation:
//!
//! ```text
//! u = e^(σ·√Δt)          up move
//! d = 1/u                down move
//! p = (e^((r-q)·Δt) - d) / (u - d)    risk-neutral up probability
//! ```
//!
//! Terminal payoffs are rolled back with the per-step discount factor
//! `e^(-r·Δt)`. For American exercise, every interior node takes the
//! maximum of continuation value and immediate exercise value.
//!
//! # Numerical behaviour
//!
//! Pricing is `O(N²)` time and `O(N)` memory: a single value row is
//! reused across the backward induction. Node spot levels follow the
//! multiplicative recurrence `S·d^i·(u/d)^j` rather than per-node
//! `powf` calls, which keeps a 750-step valuation cheap enough to sit
//! inside a root-finding loop. European and American exercise share one
//! lattice so that model error cancels when American prices are mapped
//! to European equivalents.
//!
//! The risk-neutral probability leaves `(0, 1)` when `σ·√Δt` is smaller
//! than `|r - q|·Δt`; [`LatticeParameters::is_stable`] exposes that
//! condition as a diagnostic.

use num_traits::Float;

use crate::instruments::{ExerciseStyle, OptionTerms};

/// Cox-Ross-Rubinstein binomial lattice engine.
///
/// The engine owns only the step count; market and contract inputs
/// arrive per call through [`OptionTerms`]. All calibration passes over
/// a chain reuse one engine so every price is produced by the same
/// discretisation.
///
/// # Examples
/// ```
/// use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
/// use devol_models::lattice::BinomialLattice;
///
/// let terms = OptionTerms::new(105.0_f64, 100.0, 1.0, 0.03, 0.01, PayoffType::Put).unwrap();
/// let lattice = BinomialLattice::with_defaults();
///
/// let american = lattice.price(&terms, 0.2, ExerciseStyle::American);
/// let european = lattice.price(&terms, 0.2, ExerciseStyle::European);
/// assert!(american >= european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialLattice {
    steps: usize,
}

impl Default for BinomialLattice {
    /// 750 steps, the depth at which vanilla equity prices are converged
    /// well inside typical quote precision.
    fn default() -> Self {
        Self { steps: 750 }
    }
}

impl BinomialLattice {
    /// Creates a lattice engine with the given number of time steps.
    ///
    /// # Panics
    /// Panics if `steps` is zero.
    pub fn new(steps: usize) -> Self {
        assert!(steps > 0, "lattice steps must be > 0");
        Self { steps }
    }

    /// Creates a lattice engine with the default step count.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Computes the per-step lattice coefficients for the given terms
    /// and volatility.
    ///
    /// Exposed separately so callers can inspect stability before or
    /// after a pricing pass; [`Self::price`] derives the same values
    /// internally.
    pub fn parameters<T: Float>(&self, terms: &OptionTerms<T>, vol: T) -> LatticeParameters<T> {
        let dt = terms.expiry() / T::from(self.steps).unwrap();
        let up = (vol * dt.sqrt()).exp();
        let down = up.recip();
        let growth = ((terms.rate() - terms.dividend_yield()) * dt).exp();
        let probability = (growth - down) / (up - down);
        let discount = (-terms.rate() * dt).exp();

        LatticeParameters {
            dt,
            up,
            down,
            probability,
            discount,
        }
    }

    /// Prices an option on the lattice.
    ///
    /// `vol` must be positive and finite; terms are already validated by
    /// [`OptionTerms::new`]. The engine itself is deterministic and
    /// infallible, so it can sit directly inside a solver objective.
    ///
    /// # Arguments
    /// * `terms` - Contract and market terms
    /// * `vol` - Annualised volatility to diffuse with
    /// * `style` - European or American exercise
    pub fn price<T: Float>(&self, terms: &OptionTerms<T>, vol: T, style: ExerciseStyle) -> T {
        let params = self.parameters(terms, vol);
        let steps = self.steps;
        let spot = terms.spot();
        let strike = terms.strike();
        let payoff = terms.payoff();

        // Node spot levels satisfy S·u^j·d^(i-j) = S·d^i·(u/d)^j, so a
        // multiplicative recurrence replaces per-node powf calls.
        let ratio = params.up / params.down;
        let disc_p = params.discount * params.probability;
        let disc_1mp = params.discount * (T::one() - params.probability);

        let mut values = vec![T::zero(); steps + 1];
        let mut st = spot * params.down.powi(steps as i32);
        for value in values.iter_mut() {
            *value = payoff.evaluate(st, strike);
            st = st * ratio;
        }

        let is_american = style.is_american();
        let mut base = spot * params.down.powi((steps - 1) as i32);
        for i in (0..steps).rev() {
            if is_american {
                let mut st = base;
                for j in 0..=i {
                    let continuation = disc_p.mul_add(values[j + 1], disc_1mp * values[j]);
                    values[j] = continuation.max(payoff.evaluate(st, strike));
                    st = st * ratio;
                }
            } else {
                for j in 0..=i {
                    values[j] = disc_p.mul_add(values[j + 1], disc_1mp * values[j]);
                }
            }
            base = base * params.up;
        }

        values[0]
    }
}

/// Per-step coefficients of a parameterised lattice.
///
/// All fields are public diagnostics; they are derived, not configured.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeParameters<T: Float> {
    /// Step length in years.
    pub dt: T,
    /// Multiplicative up move per step.
    pub up: T,
    /// Multiplicative down move per step.
    pub down: T,
    /// Risk-neutral probability of an up move.
    pub probability: T,
    /// Per-step discount factor.
    pub discount: T,
}

impl<T: Float> LatticeParameters<T> {
    /// Returns `true` when the risk-neutral probability is a valid
    /// probability and all coefficients are finite.
    ///
    /// An unstable parameterisation arises for very small volatilities
    /// relative to the carry rate and makes prices non-arbitrage-free.
    pub fn is_stable(&self) -> bool {
        self.probability > T::zero()
            && self.probability < T::one()
            && self.dt.is_finite()
            && self.up.is_finite()
            && self.down.is_finite()
            && self.discount.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::PayoffType;
    use approx::assert_relative_eq;

    fn golden_terms(payoff: PayoffType) -> OptionTerms<f64> {
        OptionTerms::new(105.0, 100.0, 1.0, 0.03, 0.01, payoff).unwrap()
    }

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_new_and_accessors() {
        let lattice = BinomialLattice::new(200);
        assert_eq!(lattice.steps(), 200);
    }

    #[test]
    fn test_default_step_count() {
        assert_eq!(BinomialLattice::default().steps(), 750);
        assert_eq!(BinomialLattice::with_defaults().steps(), 750);
    }

    #[test]
    #[should_panic(expected = "lattice steps must be > 0")]
    fn test_zero_steps_panics() {
        BinomialLattice::new(0);
    }

    // ========================================
    // Parameters
    // ========================================

    #[test]
    fn test_parameters_golden_inputs() {
        let lattice = BinomialLattice::with_defaults();
        let params = lattice.parameters(&golden_terms(PayoffType::Put), 0.2);

        assert_relative_eq!(params.dt, 1.0 / 750.0, epsilon = 1e-15);
        assert_relative_eq!(params.up, (0.2 * (1.0_f64 / 750.0).sqrt()).exp(), epsilon = 1e-15);
        assert_relative_eq!(params.up * params.down, 1.0, epsilon = 1e-15);
        assert!(params.is_stable());
    }

    #[test]
    fn test_parameters_unstable_low_vol() {
        // σ·√Δt below (r - q)·Δt pushes the probability above one
        let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.3, 0.0, PayoffType::Call).unwrap();
        let params = BinomialLattice::with_defaults().parameters(&terms, 0.005);

        assert!(params.probability > 1.0);
        assert!(!params.is_stable());
    }

    // ========================================
    // Pricing
    // ========================================

    #[test]
    fn test_american_put_reference_value() {
        let lattice = BinomialLattice::with_defaults();
        let price = lattice.price(&golden_terms(PayoffType::Put), 0.2, ExerciseStyle::American);
        assert!((price - 5.1462).abs() < 1e-4);
    }

    #[test]
    fn test_european_put_reference_value() {
        let lattice = BinomialLattice::with_defaults();
        let price = lattice.price(&golden_terms(PayoffType::Put), 0.2, ExerciseStyle::European);
        assert!((price - 5.0191).abs() < 1e-4);
    }

    #[test]
    fn test_american_dominates_european() {
        let lattice = BinomialLattice::with_defaults();
        for payoff in [PayoffType::Call, PayoffType::Put] {
            let terms = golden_terms(payoff);
            let american = lattice.price(&terms, 0.2, ExerciseStyle::American);
            let european = lattice.price(&terms, 0.2, ExerciseStyle::European);
            assert!(american >= european);
        }
    }

    #[test]
    fn test_european_put_call_parity() {
        let lattice = BinomialLattice::with_defaults();
        let call = lattice.price(&golden_terms(PayoffType::Call), 0.2, ExerciseStyle::European);
        let put = lattice.price(&golden_terms(PayoffType::Put), 0.2, ExerciseStyle::European);

        let forward_gap = 105.0 * (-0.01_f64).exp() - 100.0 * (-0.03_f64).exp();
        assert_relative_eq!(call - put, forward_gap, epsilon = 1e-8);
    }

    #[test]
    fn test_american_call_no_dividend_matches_european() {
        // Early exercise of a call is never optimal without dividends
        let terms = OptionTerms::new(105.0, 100.0, 1.0, 0.03, 0.0, PayoffType::Call).unwrap();
        let lattice = BinomialLattice::with_defaults();

        let american = lattice.price(&terms, 0.2, ExerciseStyle::American);
        let european = lattice.price(&terms, 0.2, ExerciseStyle::European);
        assert_relative_eq!(american, european, epsilon = 1e-10);
    }

    #[test]
    fn test_price_increases_with_volatility() {
        let lattice = BinomialLattice::with_defaults();
        let terms = golden_terms(PayoffType::Put);

        let mut last = 0.0;
        for vol in [0.1, 0.2, 0.3, 0.4] {
            let price = lattice.price(&terms, vol, ExerciseStyle::American);
            assert!(price > last);
            last = price;
        }
    }

    #[test]
    fn test_deep_itm_american_put_near_intrinsic() {
        let terms = OptionTerms::new(50.0, 100.0, 0.5, 0.05, 0.0, PayoffType::Put).unwrap();
        let lattice = BinomialLattice::with_defaults();
        let price = lattice.price(&terms, 0.2, ExerciseStyle::American);

        // Immediate exercise floors the American price at intrinsic value
        assert!(price >= 50.0);
        assert!(price < 51.0);
    }

    #[test]
    fn test_european_close_to_closed_form() {
        // The discretisation error oscillates with step count, so compare
        // against an absolute bound rather than between depths
        use crate::analytical::BlackScholes;

        let terms = golden_terms(PayoffType::Put);
        let analytical = BlackScholes::from_terms(&terms, 0.2)
            .unwrap()
            .price(PayoffType::Put, 100.0, 1.0);
        let lattice = BinomialLattice::with_defaults().price(&terms, 0.2, ExerciseStyle::European);

        assert!((lattice - analytical).abs() < 5e-3);
    }

    #[test]
    fn test_single_step_lattice() {
        let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.0, 0.0, PayoffType::Call).unwrap();
        let lattice = BinomialLattice::new(1);
        let params = lattice.parameters(&terms, 0.2);

        // One step: discounted expectation of the two terminal payoffs
        let up_payoff = 100.0 * params.up - 100.0;
        let expected = params.discount * params.probability * up_payoff;
        assert_relative_eq!(
            lattice.price(&terms, 0.2, ExerciseStyle::European),
            expected,
            epsilon = 1e-12
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn vol_strategy() -> impl Strategy<Value = f64> {
            0.05..1.5_f64
        }

        fn strike_strategy() -> impl Strategy<Value = f64> {
            60.0..150.0_f64
        }

        proptest! {
            // A shallow lattice keeps the property run cheap; monotonicity
            // does not depend on depth
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn price_monotone_in_volatility(
                vol in vol_strategy(),
                bump in 0.01..0.5_f64,
                strike in strike_strategy()
            ) {
                let terms =
                    OptionTerms::new(100.0, strike, 0.75, 0.03, 0.01, PayoffType::Put).unwrap();
                let lattice = BinomialLattice::new(64);

                let low = lattice.price(&terms, vol, ExerciseStyle::American);
                let high = lattice.price(&terms, vol + bump, ExerciseStyle::American);
                // Intrinsic-pinned prices can differ by a few ulps across vols
                prop_assert!(high >= low - 1e-9);
            }

            #[test]
            fn american_dominates_european(
                vol in vol_strategy(),
                strike in strike_strategy()
            ) {
                let lattice = BinomialLattice::new(64);
                for payoff in [PayoffType::Call, PayoffType::Put] {
                    let terms =
                        OptionTerms::new(100.0, strike, 0.75, 0.03, 0.01, payoff).unwrap();
                    let american = lattice.price(&terms, vol, ExerciseStyle::American);
                    let european = lattice.price(&terms, vol, ExerciseStyle::European);
                    prop_assert!(american >= european);
                }
            }
        }
    }
}
