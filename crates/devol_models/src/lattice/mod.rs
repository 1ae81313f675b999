//! Binomial lattice pricing and inversion for American options.
//!
//! This module provides the early-exercise half of the pricing layer:
//!
//! - [`BinomialLattice`]: Cox-Ross-Rubinstein engine pricing European
//!   and American exercise on one shared discretisation
//! - [`LatticeParameters`]: per-step coefficients with a stability
//!   diagnostic
//! - [`implied_volatility`]: bracketed bisection inversion of lattice
//!   prices
//!
//! The calibration layer maps American quotes onto this module, then
//! re-prices European exercise on the same lattice so discretisation
//! error largely cancels in the American-to-European mapping.
//!
//! # Examples
//! ```
//! use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
//! use devol_models::lattice::BinomialLattice;
//!
//! let terms = OptionTerms::new(105.0_f64, 100.0, 1.0, 0.03, 0.01, PayoffType::Put).unwrap();
//! let lattice = BinomialLattice::with_defaults();
//!
//! let params = lattice.parameters(&terms, 0.2);
//! assert!(params.is_stable());
//!
//! let premium = lattice.price(&terms, 0.2, ExerciseStyle::American)
//!     - lattice.price(&terms, 0.2, ExerciseStyle::European);
//! assert!(premium > 0.0);
//! ```

mod engine;
mod error;
mod implied;

pub use engine::{BinomialLattice, LatticeParameters};
pub use error::LatticeError;
pub use implied::{implied_volatility, VolatilityBracket};
