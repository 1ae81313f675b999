//! Implied volatility inversion for the closed-form model.
//!
//! This module inverts Black-Scholes prices with Newton-Raphson steps on
//! the analytical vega. It is used on European-equivalent prices, where
//! the surface is smooth in volatility and quadratic convergence makes
//! per-strike inversion essentially free next to lattice work.
//!
//! Prices are validated against no-arbitrage bounds first: a price at or
//! below discounted intrinsic value, or at or above its upper bound, has
//! no finite implied volatility and is rejected with a typed error rather
//! than mapped to a sentinel.
//!
//! # Limitations
//!
//! Newton can fail for quotes far from the money where vega degenerates
//! to zero faster than the price gap closes. Such failures surface as
//! [`AnalyticalError::Solver`] and are isolated per quote by the
//! calibration layer.

use num_traits::Float;

use devol_core::math::solvers::{NewtonRaphsonSolver, RootResult, SolverConfig};

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use crate::instruments::{OptionTerms, PayoffType};

/// Solves for the Black-Scholes volatility reproducing `market_price`.
///
/// # Arguments
/// * `terms` - Validated option terms (spot, strike, expiry, rates, payoff)
/// * `market_price` - Observed option premium
/// * `initial_guess` - Starting volatility for the Newton iteration
/// * `config` - Convergence tolerance and iteration budget
///
/// # Returns
/// A [`RootResult`] whose `root` is the implied volatility, together with
/// the Newton step count and final pricing residual.
///
/// # Errors
/// - [`AnalyticalError::InvalidPrice`] for negative or non-finite prices
/// - [`AnalyticalError::PriceOutOfBounds`] when no finite volatility can
///   reproduce the price
/// - [`AnalyticalError::Solver`] when the Newton iteration fails
///
/// # Examples
/// ```
/// use devol_core::math::solvers::SolverConfig;
/// use devol_models::analytical::{implied_volatility, BlackScholes};
/// use devol_models::instruments::{OptionTerms, PayoffType};
///
/// let terms = OptionTerms::new(100.0_f64, 105.0, 1.0, 0.05, 0.02, PayoffType::Call).unwrap();
/// let price = BlackScholes::from_terms(&terms, 0.25).unwrap().price_call(105.0, 1.0);
///
/// let result = implied_volatility(&terms, price, 0.2, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.25).abs() < 1e-6);
/// ```
pub fn implied_volatility<T: Float>(
    terms: &OptionTerms<T>,
    market_price: T,
    initial_guess: T,
    config: &SolverConfig<T>,
) -> Result<RootResult<T>, AnalyticalError> {
    let zero = T::zero();
    let one = T::one();

    if !market_price.is_finite() || market_price < zero {
        return Err(AnalyticalError::InvalidPrice {
            price: market_price.to_f64().unwrap_or(f64::NAN),
        });
    }

    let spot_pv = terms.spot() * (-terms.dividend_yield() * terms.expiry()).exp();
    let strike_pv = terms.strike() * (-terms.rate() * terms.expiry()).exp();

    let (lower, upper) = match terms.payoff() {
        PayoffType::Call => ((spot_pv - strike_pv).max(zero), spot_pv),
        PayoffType::Put => ((strike_pv - spot_pv).max(zero), strike_pv),
    };

    // Guard band keeps prices a few ulps away from the zero-vol and
    // infinite-vol limits, where the inversion degenerates.
    let band = T::from(32.0).unwrap() * T::epsilon() * (one + upper);
    if market_price <= lower + band || market_price >= upper - band {
        return Err(AnalyticalError::PriceOutOfBounds {
            price: market_price.to_f64().unwrap_or(f64::NAN),
            lower: lower.to_f64().unwrap_or(f64::NAN),
            upper: upper.to_f64().unwrap_or(f64::NAN),
        });
    }

    let payoff = terms.payoff();
    let strike = terms.strike();
    let expiry = terms.expiry();

    // The constructor only fails here for non-positive volatility, so the
    // error arms encode the zero-vol limit of the price surface.
    let objective = |sigma: T| match BlackScholes::from_terms(terms, sigma) {
        Ok(model) => model.price(payoff, strike, expiry) - market_price,
        Err(_) => lower - market_price,
    };
    let vega = |sigma: T| match BlackScholes::from_terms(terms, sigma) {
        Ok(model) => model.vega(strike, expiry),
        Err(_) => zero,
    };

    let solver = NewtonRaphsonSolver::new(*config);
    let result = solver.find_root(objective, vega, initial_guess)?;
    Ok(result)
}
