//! Closed-form pricing and inversion for European options.
//!
//! This module provides the analytical half of the pricing layer:
//!
//! - [`BlackScholes`]: Black-Scholes-Merton prices and Greeks under a
//!   continuous dividend yield
//! - [`implied_volatility`]: Newton-Raphson inversion of the closed form
//!   with no-arbitrage bound checks
//! - [`norm_cdf`] / [`norm_pdf`]: standard normal distribution helpers
//!
//! The lattice layer in [`crate::lattice`] handles early exercise; once a
//! price has been reduced to its European equivalent, everything here is
//! exact up to the normal CDF approximation.
//!
//! # Examples
//! ```
//! use devol_models::analytical::BlackScholes;
//! use devol_models::instruments::PayoffType;
//!
//! let model = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
//! let call = model.price(PayoffType::Call, 100.0, 1.0);
//! let put = model.price(PayoffType::Put, 100.0, 1.0);
//!
//! // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
//! let forward_gap = 100.0 * (-0.02_f64).exp() - 100.0 * (-0.05_f64).exp();
//! assert!((call - put - forward_gap).abs() < 1e-10);
//! ```

mod black_scholes;
mod distributions;
mod error;
mod implied;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied::implied_volatility;
