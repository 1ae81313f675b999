//! Error types for lattice pricing and inversion.

use devol_core::types::SolverError;

/// Errors raised by the lattice implied volatility inversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LatticeError {
    /// The market price is negative or not finite.
    #[error("Invalid market price: {price}")]
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },

    /// The root-finding iteration failed.
    ///
    /// A `NoBracket` source means no volatility inside the search bracket
    /// reproduces the price, which is the lattice analogue of a quote
    /// violating no-arbitrage bounds.
    #[error("Implied volatility solver failed: {0}")]
    Solver(#[from] SolverError),
}
