//! Calibration-specific error types.
//!
//! This module provides structured error handling for the de-Americanisation
//! pipeline with diagnostic context for each failure mode. Solver failures
//! from the lower layers are wrapped with the quote that triggered them
//! (payoff side, strike, expiry) so a failed strike can be reported without
//! re-running the solve.

use devol_core::math::solvers::SolverKind;
use devol_core::types::SolverError;
use devol_models::analytical::AnalyticalError;
use devol_models::instruments::PayoffType;
use devol_models::lattice::LatticeError;
use num_traits::Float;
use thiserror::Error;

/// Errors that can occur during forward/yield calibration and curve building.
///
/// # Variants
///
/// - `InvalidChain`: Chain input violates a positivity or shape invariant
/// - `ImpliedVol`: An implied volatility solve failed for a specific quote
/// - `EquivalentPriceOutOfBounds`: A de-Americanised European price fell
///   outside the closed-form no-arbitrage band
/// - `FixedPointExhausted`: The forward/yield iteration hit its budget
/// - `NumericAnomaly`: A value that is finite by construction was not
///
/// # Examples
///
/// ```
/// use devol_calibration::CalibrationError;
///
/// let err = CalibrationError::invalid_chain("no quotes supplied");
/// assert!(format!("{}", err).contains("no quotes"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalibrationError {
    /// Chain input failed validation before any solving started.
    #[error("Invalid option chain: {message}")]
    InvalidChain {
        /// Which invariant was violated, with the offending value
        message: String,
    },

    /// An implied volatility solve failed for one quote.
    #[error(
        "{solver} implied volatility failed for the {payoff} at strike {strike}, expiry {expiry}: {source}"
    )]
    ImpliedVol {
        /// Algorithm that gave up
        solver: SolverKind,
        /// Payoff side of the failing quote
        payoff: PayoffType,
        /// Strike of the failing quote
        strike: f64,
        /// Time to expiry in years
        expiry: f64,
        /// Underlying solver failure
        #[source]
        source: SolverError,
    },

    /// A de-Americanised European price violated the closed-form
    /// no-arbitrage bounds, so no Black-Scholes volatility exists for it.
    #[error(
        "equivalent European {payoff} price {price} at strike {strike} is outside the arbitrage bounds ({lower}, {upper})"
    )]
    EquivalentPriceOutOfBounds {
        /// Payoff side of the failing quote
        payoff: PayoffType,
        /// Strike of the failing quote
        strike: f64,
        /// The out-of-bounds equivalent price
        price: f64,
        /// Lower no-arbitrage bound
        lower: f64,
        /// Upper no-arbitrage bound
        upper: f64,
    },

    /// The forward/yield fixed point did not contract below tolerance
    /// within its iteration budget.
    #[error(
        "fixed point not converged at strike {strike}, expiry {expiry}: |yield change| = {delta:e} after {iterations} iterations"
    )]
    FixedPointExhausted {
        /// Anchor strike of the parity pair
        strike: f64,
        /// Time to expiry in years
        expiry: f64,
        /// Iterations performed
        iterations: usize,
        /// Last observed yield change
        delta: f64,
    },

    /// A quantity that is finite for every validated input was not.
    #[error("Numerical anomaly: {message}")]
    NumericAnomaly {
        /// What went non-finite and where
        message: String,
    },
}

impl CalibrationError {
    /// Create an invalid chain error.
    pub fn invalid_chain(message: impl Into<String>) -> Self {
        Self::InvalidChain {
            message: message.into(),
        }
    }

    /// Create a numerical anomaly error.
    pub fn numeric_anomaly(message: impl Into<String>) -> Self {
        Self::NumericAnomaly {
            message: message.into(),
        }
    }

    /// Check if this is an invalid chain error.
    pub fn is_invalid_chain(&self) -> bool {
        matches!(self, Self::InvalidChain { .. })
    }

    /// Check if this is an implied volatility failure.
    pub fn is_implied_vol(&self) -> bool {
        matches!(self, Self::ImpliedVol { .. })
    }

    /// Check if this is a fixed-point budget exhaustion.
    pub fn is_fixed_point_exhausted(&self) -> bool {
        matches!(self, Self::FixedPointExhausted { .. })
    }

    /// Wrap a lattice implied volatility failure with its quote context.
    pub(crate) fn from_lattice<T: Float>(
        error: LatticeError,
        payoff: PayoffType,
        strike: T,
        expiry: T,
    ) -> Self {
        match error {
            LatticeError::InvalidPrice { price } => Self::InvalidChain {
                message: format!("invalid {payoff} price: {price}"),
            },
            LatticeError::Solver(source) => Self::ImpliedVol {
                solver: SolverKind::Bisection,
                payoff,
                strike: strike.to_f64().unwrap_or(f64::NAN),
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
                source,
            },
        }
    }

    /// Wrap a closed-form implied volatility failure with its quote context.
    pub(crate) fn from_analytical<T: Float>(
        error: AnalyticalError,
        payoff: PayoffType,
        strike: T,
        expiry: T,
    ) -> Self {
        match error {
            AnalyticalError::Solver(source) => Self::ImpliedVol {
                solver: SolverKind::NewtonRaphson,
                payoff,
                strike: strike.to_f64().unwrap_or(f64::NAN),
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
                source,
            },
            AnalyticalError::PriceOutOfBounds {
                price,
                lower,
                upper,
            } => Self::EquivalentPriceOutOfBounds {
                payoff,
                strike: strike.to_f64().unwrap_or(f64::NAN),
                price,
                lower,
                upper,
            },
            // The remaining arms reject inputs the pipeline has already
            // validated, so reaching them means a computed value went bad.
            other => Self::NumericAnomaly {
                message: other.to_string(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
