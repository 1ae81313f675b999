//! Option instrument definitions.
//!
//! This module provides the validated value types every pricing call
//! consumes:
//!
//! - [`OptionTerms`]: spot, strike, expiry, rates and payoff direction
//! - [`PayoffType`]: call/put with exact intrinsic evaluation
//! - [`ExerciseStyle`]: European or American exercise
//!
//! # Examples
//!
//! ```
//! use devol_models::instruments::{ExerciseStyle, OptionTerms, PayoffType};
//!
//! let terms = OptionTerms::new(105.0_f64, 100.0, 1.0, 0.03, 0.01, PayoffType::Put).unwrap();
//! let style = ExerciseStyle::American;
//!
//! assert!(style.is_american());
//! assert_eq!(terms.payoff().evaluate(90.0, terms.strike()), 10.0);
//! ```

mod error;
mod exercise;
mod payoff;
mod vanilla;

// Re-export public types at module level
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use payoff::PayoffType;
pub use vanilla::OptionTerms;
