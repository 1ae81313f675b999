//! Root-finding solvers for one-dimensional numerical problems.
//!
//! This module provides the root-finding algorithms used throughout the
//! calibration engine, primarily for implied volatility inversion: a robust
//! bracketing bisection solver for lattice-priced options and a fast
//! Newton-Raphson solver for closed-form models with analytic derivatives.
//!
//! ## Available Solvers
//!
//! - [`BisectionSolver`]: Robust bracketing method without derivative
//!   requirement, guaranteed to converge when the bracket contains a root
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-8)
//! - `max_iterations`: Maximum iteration count (default: 750)
//!
//! ## Results
//!
//! Successful solves return a [`RootResult`] carrying the root together with
//! the iteration count and the final residual, so callers can surface
//! convergence diagnostics without re-evaluating the objective.
//! [`SolverKind`] identifies which algorithm produced a result or failure
//! when errors are propagated across layer boundaries.
//!
//! ## Examples
//!
//! ### Bracketing Root-Finding
//!
//! ```
//! use devol_core::math::solvers::{BisectionSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2) on the bracket [0, 2]
//! let solver = BisectionSolver::new(SolverConfig::default());
//! let result = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//!
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-7);
//! ```
//!
//! ### Derivative-Based Root-Finding
//!
//! ```
//! use devol_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 starting from x = 1
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let result = solver.find_root(f, f_prime, 1.0).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```

mod bisection;
mod config;
mod newton_raphson;
mod result;

// Re-export public types at module level
pub use bisection::BisectionSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
pub use result::{RootResult, SolverKind};
