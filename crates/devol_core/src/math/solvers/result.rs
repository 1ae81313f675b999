//! Structured results shared by the root-finding solvers.

use std::fmt;

use num_traits::Float;

/// Result of a successful root-finding solve.
///
/// Both [`BisectionSolver`](crate::math::solvers::BisectionSolver) and
/// [`NewtonRaphsonSolver`](crate::math::solvers::NewtonRaphsonSolver) return
/// this on convergence so callers can record how hard the solve was without
/// re-evaluating the objective.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootResult<T: Float> {
    /// The converged root.
    pub root: T,
    /// Number of iterations performed before convergence.
    pub iterations: usize,
    /// Objective value at the returned root.
    pub residual: T,
}

impl<T: Float> RootResult<T> {
    /// Create a new root-finding result.
    pub fn new(root: T, iterations: usize, residual: T) -> Self {
        Self {
            root,
            iterations,
            residual,
        }
    }
}

/// Identifies which root-finding algorithm produced a result or failure.
///
/// Carried in error contexts so failures reported across layer boundaries
/// name the algorithm that gave up, not just the input that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverKind {
    /// Interval-halving bracketing solver.
    Bisection,
    /// Derivative-based Newton-Raphson solver.
    NewtonRaphson,
    /// Fixed-point iteration (used by the calibration layer).
    FixedPoint,
}

impl SolverKind {
    /// Human-readable algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Bisection => "bisection",
            SolverKind::NewtonRaphson => "Newton-Raphson",
            SolverKind::FixedPoint => "fixed-point",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
