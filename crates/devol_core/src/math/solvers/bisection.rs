//! Bisection root-finding solver.
//!
//! This module provides the [`BisectionSolver`], a bracketing method that
//! repeatedly halves an interval known to contain a root. Convergence is
//! linear but unconditional: as long as the objective changes sign across
//! the bracket, the solver cannot diverge or step outside the interval.
//!
//! That robustness is why the lattice implied-volatility inversion uses
//! bisection rather than a derivative-based method. Lattice prices are only
//! piecewise-smooth in volatility (the early-exercise boundary moves between
//! nodes), which makes Newton steps unreliable, while the bracket
//! `[sigma_min, sigma_max]` is cheap to establish up front.
//!
//! # Algorithm
//!
//! ```text
//! mid = (lo + hi) / 2
//! if f(mid) and f(lo) share a sign: lo = mid
//! else:                            hi = mid
//! ```
//!
//! The solve converges when `f(mid)` is exactly zero or the bracket width
//! falls below the configured tolerance.
//!
//! # Example
//!
//! ```
//! use devol_core::math::solvers::{BisectionSolver, SolverConfig};
//!
//! // Find the positive root of x² - 2 on [0, 2]
//! let solver = BisectionSolver::new(SolverConfig::default());
//! let result = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//!
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-7);
//! ```

use num_traits::Float;

use crate::math::solvers::config::SolverConfig;
use crate::math::solvers::result::RootResult;
use crate::types::SolverError;

/// Bisection solver for one-dimensional root-finding on a bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` within the bracket `[lo, hi]`.
    ///
    /// The endpoints may be given in either order. The objective must have
    /// opposite signs at the two endpoints; if it does not, the solver
    /// returns [`SolverError::NoBracket`] rather than silently converging
    /// to an endpoint.
    ///
    /// # Arguments
    ///
    /// * `f` - Objective function
    /// * `lo` - One end of the bracket
    /// * `hi` - Other end of the bracket
    ///
    /// # Returns
    ///
    /// A [`RootResult`] with the midpoint of the final bracket, the number
    /// of bisection steps taken, and the objective value at the root.
    ///
    /// # Errors
    ///
    /// * [`SolverError::NoBracket`] - `f(lo)` and `f(hi)` have the same sign
    /// * [`SolverError::NumericalInstability`] - the objective returned a
    ///   non-finite value
    /// * [`SolverError::MaxIterationsExceeded`] - the bracket did not shrink
    ///   below the tolerance within the iteration budget
    pub fn find_root<F>(&self, f: F, lo: T, hi: T) -> Result<RootResult<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        let mut f_lo = f(lo);
        let f_hi = f(hi);

        if !f_lo.is_finite() || !f_hi.is_finite() {
            return Err(SolverError::NumericalInstability(
                "objective is non-finite at a bracket endpoint".to_string(),
            ));
        }

        // Roots sitting exactly on an endpoint short-circuit the loop.
        if f_lo == T::zero() {
            return Ok(RootResult::new(lo, 0, f_lo));
        }
        if f_hi == T::zero() {
            return Ok(RootResult::new(hi, 0, f_hi));
        }

        if f_lo * f_hi > T::zero() {
            return Err(SolverError::NoBracket {
                lo: lo.to_f64().unwrap_or(f64::NAN),
                hi: hi.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::from(2.0).unwrap();
        let mut residual = f64::NAN;

        for iteration in 1..=self.config.max_iterations {
            let mid = (lo + hi) / two;
            let f_mid = f(mid);

            if !f_mid.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "objective produced a non-finite value inside the bracket".to_string(),
                ));
            }

            if f_mid == T::zero() || (hi - lo) < self.config.tolerance {
                return Ok(RootResult::new(mid, iteration, f_mid));
            }

            // Keep the half-interval whose endpoints still straddle the root.
            if f_mid * f_lo > T::zero() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }

            residual = f_mid.abs().to_f64().unwrap_or(f64::NAN);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            residual,
        })
    }
}

impl<T: Float> Default for BisectionSolver<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}
