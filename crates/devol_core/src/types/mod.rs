//! Core type definitions shared across the calibration engine.
//!
//! This module provides:
//!
//! - `time`: Date handling and day count conventions
//! - `error`: Error types for solvers and date operations

pub mod error;
pub mod time;

// Re-export commonly used types at the module level
pub use error::{DateError, SolverError};
pub use time::{Date, DayCountConvention};
