//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to the closed-form model and its
//!   implied volatility inversion

use devol_core::types::SolverError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Provides structured error handling for closed-form pricing and implied
/// volatility inversion with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidPrice`: Negative or non-finite market price
/// - `PriceOutOfBounds`: Market price violates no-arbitrage bounds
/// - `Solver`: The Newton-Raphson inversion failed
///
/// # Examples
/// ```
/// use devol_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid market price (negative or non-finite).
    #[error("Invalid market price: {price}")]
    InvalidPrice {
        /// The invalid price value
        price: f64,
    },

    /// Market price violates no-arbitrage bounds, so no finite implied
    /// volatility exists.
    #[error("Price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    PriceOutOfBounds {
        /// The observed market price
        price: f64,
        /// Lower no-arbitrage bound (discounted intrinsic value)
        lower: f64,
        /// Upper no-arbitrage bound
        upper: f64,
    },

    /// Implied volatility inversion failed.
    #[error("Implied volatility solver failed: {0}")]
    Solver(#[from] SolverError),
}
