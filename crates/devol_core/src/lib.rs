//! # devol_core: Numerical Foundation for the Devol Calibration Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! devol_core serves as the bottom layer of the 3-layer architecture, providing:
//! - One-dimensional root-finding solvers (`math::solvers`)
//! - Shared solver configuration and results (`math::solvers::SolverConfig`, `RootResult`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `SolverError`, `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other devol_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error type derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use devol_core::math::solvers::{BisectionSolver, SolverConfig};
//! use devol_core::types::{Date, DayCountConvention};
//!
//! // Date operations
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let year_fraction = DayCountConvention::ActualActual365.year_fraction(start, end);
//! assert!(year_fraction > 0.0);
//!
//! // Root finding: f(x) = x^2 - 4 on [0, 5]
//! let solver = BisectionSolver::new(SolverConfig::default());
//! let result = solver.find_root(|x: f64| x * x - 4.0, 0.0, 5.0).unwrap();
//! assert!((result.root - 2.0).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date`, `DayCountConvention`, `SolverConfig`
//!   and the error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
