//! Newton-Raphson root-finding solver.
//!
//! This module provides the [`NewtonRaphsonSolver`] for finding roots of
//! smooth functions with known derivatives. The calibration engine uses it
//! to invert closed-form prices, where the analytic vega makes each step
//! cheap and convergence is quadratic near the root.
//!
//! # Algorithm
//!
//! ```text
//! x_{n+1} = x_n - f(x_n) / f'(x_n)
//! ```
//!
//! The iteration stops when `|f(x)| < tolerance`. The solver guards against
//! a vanishing derivative and against non-finite iterates, both of which are
//! reported as typed errors rather than looping forever.
//!
//! # Example
//!
//! ```
//! use devol_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let result = solver.find_root(f, f_prime, 1.0).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```

use num_traits::Float;

use crate::math::solvers::config::SolverConfig;
use crate::math::solvers::result::RootResult;
use crate::types::SolverError;

/// Newton-Raphson solver for functions with analytic derivatives.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
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

    /// Find a root of `f` starting from `initial_guess`.
    ///
    /// # Arguments
    ///
    /// * `f` - Objective function
    /// * `f_prime` - Derivative of the objective
    /// * `initial_guess` - Starting point for the iteration
    ///
    /// # Returns
    ///
    /// A [`RootResult`] with the converged root, the number of Newton steps
    /// taken, and the objective value at the root.
    ///
    /// # Errors
    ///
    /// * [`SolverError::DerivativeNearZero`] - `|f'(x)|` fell below 1e-30
    /// * [`SolverError::NumericalInstability`] - an iterate became non-finite
    /// * [`SolverError::MaxIterationsExceeded`] - `|f(x)|` stayed above the
    ///   tolerance for the whole iteration budget
    pub fn find_root<F, G>(
        &self,
        f: F,
        f_prime: G,
        initial_guess: T,
    ) -> Result<RootResult<T>, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = initial_guess;
        let epsilon = T::from(1e-30).unwrap();
        let mut residual = f64::NAN;

        for iteration in 0..self.config.max_iterations {
            let f_val = f(x);
            residual = f_val.abs().to_f64().unwrap_or(f64::NAN);

            if f_val.abs() < self.config.tolerance {
                return Ok(RootResult::new(x, iteration, f_val));
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < epsilon {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = x - f_val / f_prime_val;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced a non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            residual,
        })
    }
}

impl<T: Float> Default for NewtonRaphsonSolver<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}
