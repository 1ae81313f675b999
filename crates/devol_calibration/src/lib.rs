//! # devol_calibration
//!
//! De-Americanisation calibration for American equity option chains.
//!
//! This crate sits at the top of the 3-layer architecture, turning observed
//! American option prices into the European-style volatility inputs that
//! closed-form surface fitting expects. It solves two inverse problems per
//! expiry: the implied forward and continuous dividend yield (a fixed point
//! over put-call parity), and per-strike equivalent European volatilities.
//!
//! ## Architecture Position
//!
//! Layer 3 (Calibration). Depends on `devol_core` (L1 solvers and time
//! types) and `devol_models` (L2 lattice and closed-form pricing).
//!
//! ## Modules
//!
//! - `chain`: Read-only chain inputs (`ChainSlice`, quotes, parity pair)
//! - `calibrator`: Forward/yield fixed point (`Deamericaniser`)
//! - `curve`: Per-strike conversion to a volatility curve (`CurveBuilder`)
//! - `config`: Shared calibration configuration
//! - `result`: Results and the per-iteration diagnostic trace
//!
//! ## Example
//!
//! ```rust,ignore
//! use devol_calibration::prelude::*;
//!
//! let chain = ChainSlice::new(snapshot, expiry, parity_pair, quotes);
//! let builder = CurveBuilder::new(DeamericaniserConfig::default());
//! let result = builder.build(&chain, 0.0001)?;
//! println!("forward {}, yield {}", result.forward_yield.forward, result.forward_yield.dividend_yield);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for every chain, result and error type
//! - `parallel`: Per-strike conversion across rayon workers
//!   (`CurveBuilder::build_parallel`)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibrator;
pub mod chain;
pub mod config;
pub mod curve;
pub mod result;

mod error;

pub use error::CalibrationError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::calibrator::Deamericaniser;
    pub use crate::chain::{ChainSlice, Expiry, MarketSnapshot, OptionQuote, ParityPair};
    pub use crate::config::{DeamericaniserConfig, DeamericaniserConfigBuilder};
    pub use crate::curve::{
        CurveBuildResult, CurveBuilder, CurvePoint, StrikeFailure, VolatilityCurve,
    };
    pub use crate::result::{
        CalibratedForward, CalibrationDiagnostics, FixedPointStep, ForwardYieldPair,
    };
    pub use crate::CalibrationError;
}
