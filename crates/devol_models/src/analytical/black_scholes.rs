//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model with a continuous dividend
//! yield for pricing European call and put options, together with the
//! analytical Greeks the implied volatility solver needs.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::{OptionTerms, PayoffType};

/// Black-Scholes model for European option pricing.
///
/// Provides closed-form pricing and Greeks under lognormal dynamics with
/// a continuous dividend yield. The model captures the market state
/// (spot, rate, yield, volatility); strike and expiry vary per call.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use devol_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call_price - put_price
///     - (100.0 * (-0.02_f64).exp() - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `dividend_yield` - Continuous dividend yield (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use devol_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
    ///
    /// // Invalid volatility
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.02, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Creates a model from option terms and a candidate volatility.
    ///
    /// Convenience constructor for implied volatility solvers, which hold
    /// terms fixed and vary volatility per evaluation.
    pub fn from_terms(terms: &OptionTerms<T>, volatility: T) -> Result<Self, AnalyticalError> {
        Self::new(
            terms.spot(),
            terms.rate(),
            terms.dividend_yield(),
            volatility,
        )
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// # Returns
    /// The d1 term. Returns large positive/negative values for limiting cases.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let zero = T::zero();
        let half = T::from(0.5).unwrap();
        let epsilon = T::from(1e-10).unwrap();

        // Handle expiry ≈ 0 case
        if expiry <= epsilon {
            let large = T::from(100.0).unwrap();
            if self.spot > strike {
                return large;
            } else if self.spot < strike {
                return -large;
            } else {
                return zero;
            }
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();

        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        let epsilon = T::from(1e-10).unwrap();

        if expiry <= epsilon {
            return self.d1(strike, expiry);
        }

        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use devol_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
    /// assert!(bs.price_call(100.0, 1.0) > 0.0);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let zero = T::zero();
        let epsilon = T::from(1e-10).unwrap();

        // Handle expiry = 0: return intrinsic value
        if expiry <= epsilon {
            return (self.spot - strike).max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);

        let spot_discount = (-self.dividend_yield * expiry).exp();
        let strike_discount = (-self.rate * expiry).exp();

        self.spot * spot_discount * norm_cdf(d1) - strike * strike_discount * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use devol_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
    /// assert!(bs.price_put(100.0, 1.0) > 0.0);
    /// ```
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let zero = T::zero();
        let epsilon = T::from(1e-10).unwrap();

        // Handle expiry = 0: return intrinsic value
        if expiry <= epsilon {
            return (strike - self.spot).max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);

        let spot_discount = (-self.dividend_yield * expiry).exp();
        let strike_discount = (-self.rate * expiry).exp();

        strike * strike_discount * norm_cdf(-d2) - self.spot * spot_discount * norm_cdf(-d1)
    }

    /// Prices a call or put according to the payoff type.
    #[inline]
    pub fn price(&self, payoff: PayoffType, strike: T, expiry: T) -> T {
        match payoff {
            PayoffType::Call => self.price_call(strike, expiry),
            PayoffType::Put => self.price_put(strike, expiry),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, payoff: PayoffType, strike: T, expiry: T) -> T {
        let epsilon = T::from(1e-10).unwrap();
        let one = T::one();
        let zero = T::zero();

        if expiry <= epsilon {
            return match payoff {
                PayoffType::Call => {
                    if self.spot > strike {
                        one
                    } else {
                        zero
                    }
                }
                PayoffType::Put => {
                    if self.spot < strike {
                        -one
                    } else {
                        zero
                    }
                }
            };
        }

        let spot_discount = (-self.dividend_yield * expiry).exp();
        let n_d1 = norm_cdf(self.d1(strike, expiry));

        match payoff {
            PayoffType::Call => spot_discount * n_d1,
            PayoffType::Put => spot_discount * (n_d1 - one),
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T)
    ///
    /// Gamma is the same for both calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        let epsilon = T::from(1e-10).unwrap();

        if expiry <= epsilon {
            return T::zero();
        }

        let spot_discount = (-self.dividend_yield * expiry).exp();
        let d1 = self.d1(strike, expiry);

        spot_discount * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ).
    ///
    /// Vega = K·e^(-rT)·√T·φ(d₂)
    ///
    /// Vega is the same for both calls and puts (the strike-side form is
    /// identical to S·e^(-qT)·√T·φ(d₁) by the usual density identity).
    /// This is the derivative the Newton-Raphson implied volatility
    /// inversion divides by.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        let epsilon = T::from(1e-10).unwrap();

        if expiry <= epsilon {
            return T::zero();
        }

        let strike_discount = (-self.rate * expiry).exp();
        let d2 = self.d2(strike, expiry);

        strike * strike_discount * expiry.sqrt() * norm_pdf(d2)
    }
}
