//! Mathematical utilities for the calibration engine.
//!
//! This module provides the numerical building blocks shared by the
//! pricing and calibration layers:
//!
//! - `solvers`: One-dimensional root-finding (bisection, Newton-Raphson)
//!   with a shared configuration type and structured results

pub mod solvers;
