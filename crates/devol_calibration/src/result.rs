//! Calibration results and the fixed-point diagnostic trace.
//!
//! The calibrator returns a [`CalibratedForward`]: the forward/yield pair
//! the fixed point converged to, plus [`CalibrationDiagnostics`] carrying
//! one [`FixedPointStep`] per iteration. The trace makes every solve
//! auditable after the fact without re-running it.

use num_traits::Float;

/// The implied forward and dividend yield for one expiry.
///
/// The two are redundant given spot, rate and expiry
/// (`F = S0·e^((r - q)·T)`); both are carried so consumers need no
/// market context to read either.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForwardYieldPair<T: Float> {
    /// Implied forward price
    pub forward: T,
    /// Implied continuous dividend yield
    pub dividend_yield: T,
}

impl<T: Float> ForwardYieldPair<T> {
    /// Create a forward/yield pair.
    pub fn new(forward: T, dividend_yield: T) -> Self {
        Self {
            forward,
            dividend_yield,
        }
    }
}

/// Observables of one de-Americanisation iteration.
///
/// Field order follows the sweep: imply both American volatilities under
/// the current yield guess, re-price the pair as European on the same
/// lattice, read the forward off parity, update the yield.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPointStep<T: Float> {
    /// Iteration index, starting at 1
    pub iteration: usize,
    /// Dividend yield the sweep priced under
    pub yield_guess: T,
    /// American implied volatility of the anchor call
    pub call_vol: T,
    /// American implied volatility of the anchor put
    pub put_vol: T,
    /// European lattice price of the call at `call_vol`
    pub european_call: T,
    /// European lattice price of the put at `put_vol`
    pub european_put: T,
    /// Forward implied by parity from the European prices
    pub forward: T,
    /// Yield implied by the updated forward
    pub updated_yield: T,
    /// Absolute change in forward from the previous sweep
    pub forward_change: T,
    /// Absolute change in yield from the previous sweep
    pub yield_change: T,
}

/// Convergence record of one fixed-point solve.
///
/// # Examples
///
/// ```
/// use devol_calibration::result::CalibrationDiagnostics;
///
/// let diagnostics: CalibrationDiagnostics<f64> =
///     CalibrationDiagnostics::new(6, 1.9e-7, Vec::new());
/// assert_eq!(diagnostics.iterations, 6);
/// assert!(diagnostics.last_step().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationDiagnostics<T: Float> {
    /// Iterations performed before convergence
    pub iterations: usize,
    /// Final yield change that passed the tolerance test
    pub residual: T,
    /// Per-iteration trace, in sweep order
    pub trace: Vec<FixedPointStep<T>>,
}

impl<T: Float> CalibrationDiagnostics<T> {
    /// Create a diagnostics record.
    pub fn new(iterations: usize, residual: T, trace: Vec<FixedPointStep<T>>) -> Self {
        Self {
            iterations,
            residual,
            trace,
        }
    }

    /// The converged iteration's observables, if any iteration ran.
    pub fn last_step(&self) -> Option<&FixedPointStep<T>> {
        self.trace.last()
    }
}

/// A converged de-Americanisation calibration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibratedForward<T: Float> {
    /// The forward/yield pair the fixed point converged to
    pub forward_yield: ForwardYieldPair<T>,
    /// Per-iteration convergence record
    pub diagnostics: CalibrationDiagnostics<T>,
}

impl<T: Float> CalibratedForward<T> {
    /// Create a calibrated forward result.
    pub fn new(forward_yield: ForwardYieldPair<T>, diagnostics: CalibrationDiagnostics<T>) -> Self {
        Self {
            forward_yield,
            diagnostics,
        }
    }

    /// Implied forward price.
    pub fn forward(&self) -> T {
        self.forward_yield.forward
    }

    /// Implied continuous dividend yield.
    pub fn dividend_yield(&self) -> T {
        self.forward_yield.dividend_yield
    }

    /// Iterations the fixed point needed.
    pub fn iterations(&self) -> usize {
        self.diagnostics.iterations
    }
}

// ============================================================================
// Tests
// ============================================================================
