//! Payoff types for vanilla options.
//!
//! This module provides the [`PayoffType`] enum used across the lattice
//! and closed-form pricers. Payoffs are evaluated exactly (hard max), as
//! required by early-exercise comparisons on the lattice.

use std::fmt;

use num_traits::Float;

/// Vanilla option payoff type.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use devol_models::instruments::PayoffType;
///
/// let call = PayoffType::Call;
/// assert_eq!(call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(call.evaluate(90.0_f64, 100.0), 0.0);
///
/// let put = PayoffType::Put;
/// assert_eq!(put.evaluate(90.0_f64, 100.0), 10.0);
/// assert_eq!(put.evaluate(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Evaluates the intrinsic payoff at the given spot level.
    ///
    /// # Arguments
    /// * `spot` - Underlying price at evaluation
    /// * `strike` - Strike price
    ///
    /// # Returns
    /// The exact intrinsic value, never negative.
    #[inline]
    pub fn evaluate<T: Float>(&self, spot: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            PayoffType::Call => (spot - strike).max(zero),
            PayoffType::Put => (strike - spot).max(zero),
        }
    }

    /// Returns the payoff direction: +1 for calls, -1 for puts.
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            PayoffType::Call => T::one(),
            PayoffType::Put => -T::one(),
        }
    }

    /// Returns true if this is a call payoff.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns true if this is a put payoff.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffType::Call => write!(f, "call"),
            PayoffType::Put => write!(f, "put"),
        }
    }
}
