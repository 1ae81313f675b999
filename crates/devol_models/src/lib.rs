//! # Devol Models (L2: Pricing Models)
//!
//! Option instruments and the pricing models the calibration layer inverts.
//!
//! This crate provides:
//! - Instrument definitions (vanilla calls and puts, exercise styles)
//! - Cox-Ross-Rubinstein binomial lattice pricing for American and
//!   European options
//! - Black-Scholes closed-form pricing with analytical Greeks
//! - Implied volatility inversion for both pricing models
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** so pricing code runs at any precision
//! - **Stateless value types**: models capture market state at construction
//!   and every pricing call is a pure function of its inputs
//! - **Typed failures**: implied volatility solves surface solver errors
//!   instead of returning sentinel values

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod lattice;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
