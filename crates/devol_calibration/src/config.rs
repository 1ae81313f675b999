//! Calibration configuration types.
//!
//! This module provides the configuration shared by the de-Americanisation
//! calibrator and the curve builder: fixed-point controls, the lattice
//! depth, and the solver settings of the two implied volatility inversions.

use devol_core::math::solvers::SolverConfig;
use devol_models::lattice::VolatilityBracket;
use num_traits::Float;

/// Configuration for de-Americanisation calibration.
///
/// Bundles the fixed-point controls with the settings of every numerical
/// component the pipeline touches, so one value pins down a calibration
/// run completely.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use devol_calibration::config::DeamericaniserConfig;
///
/// // Use default configuration
/// let config: DeamericaniserConfig<f64> = DeamericaniserConfig::default();
/// assert_eq!(config.lattice_steps, 750);
///
/// // Custom configuration
/// let config = DeamericaniserConfig::<f64>::builder()
///     .lattice_steps(200)
///     .fixed_point_tolerance(1e-4)
///     .build();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeamericaniserConfig<T: Float> {
    /// Convergence tolerance of the forward/yield fixed point.
    ///
    /// The iteration stops when the absolute yield change falls below
    /// this value.
    /// Default: 1e-6
    pub fixed_point_tolerance: T,

    /// Maximum fixed-point iterations before giving up.
    ///
    /// Exhaustion returns `CalibrationError::FixedPointExhausted`.
    /// Default: 750
    pub fixed_point_max_iterations: usize,

    /// Binomial lattice depth used for every price and inversion.
    ///
    /// One depth is used throughout a run so discretisation error cancels
    /// between the American inversion and the European re-pricing.
    /// Default: 750
    pub lattice_steps: usize,

    /// Volatility search interval of the lattice bisection.
    ///
    /// Default: [0.001, 10.0]
    pub bracket: VolatilityBracket<T>,

    /// Solver settings of the lattice bisection.
    ///
    /// Default: tolerance 1e-8, 750 iterations
    pub bisection: SolverConfig<T>,

    /// Solver settings of the Black-Scholes Newton-Raphson inversion.
    ///
    /// Default: tolerance 1e-8, 750 iterations
    pub newton: SolverConfig<T>,

    /// Initial volatility guess of the Newton-Raphson inversion.
    ///
    /// Default: 0.2
    pub newton_guess: T,
}

impl<T: Float> Default for DeamericaniserConfig<T> {
    fn default() -> Self {
        Self {
            fixed_point_tolerance: T::from(1e-6).unwrap(),
            fixed_point_max_iterations: 750,
            lattice_steps: 750,
            bracket: VolatilityBracket::default(),
            bisection: SolverConfig::default(),
            newton: SolverConfig::default(),
            newton_guess: T::from(0.2).unwrap(),
        }
    }
}

impl<T: Float> DeamericaniserConfig<T> {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> DeamericaniserConfigBuilder<T> {
        DeamericaniserConfigBuilder::new()
    }

    /// Create a high-precision configuration.
    ///
    /// Tightens the fixed point to 1e-8, deepens the lattice to 1500
    /// steps, and uses high-precision solver settings throughout.
    pub fn high_precision() -> Self {
        Self {
            fixed_point_tolerance: T::from(1e-8).unwrap(),
            lattice_steps: 1500,
            bisection: SolverConfig::high_precision(),
            newton: SolverConfig::high_precision(),
            ..Self::default()
        }
    }

    /// Create a fast configuration for interactive use.
    ///
    /// Relaxes the fixed point to 1e-4, shrinks the lattice to 200 steps,
    /// and uses fast solver settings throughout.
    pub fn fast() -> Self {
        Self {
            fixed_point_tolerance: T::from(1e-4).unwrap(),
            lattice_steps: 200,
            bisection: SolverConfig::fast(),
            newton: SolverConfig::fast(),
            ..Self::default()
        }
    }

    /// Set the fixed-point tolerance.
    pub fn with_fixed_point_tolerance(mut self, tolerance: T) -> Self {
        self.fixed_point_tolerance = tolerance;
        self
    }

    /// Set the maximum fixed-point iterations.
    pub fn with_fixed_point_max_iterations(mut self, max_iterations: usize) -> Self {
        self.fixed_point_max_iterations = max_iterations;
        self
    }

    /// Set the lattice depth.
    pub fn with_lattice_steps(mut self, lattice_steps: usize) -> Self {
        self.lattice_steps = lattice_steps;
        self
    }

    /// Set the volatility search bracket.
    pub fn with_bracket(mut self, bracket: VolatilityBracket<T>) -> Self {
        self.bracket = bracket;
        self
    }

    /// Set the bisection solver settings.
    pub fn with_bisection(mut self, bisection: SolverConfig<T>) -> Self {
        self.bisection = bisection;
        self
    }

    /// Set the Newton-Raphson solver settings.
    pub fn with_newton(mut self, newton: SolverConfig<T>) -> Self {
        self.newton = newton;
        self
    }

    /// Set the Newton-Raphson initial guess.
    pub fn with_newton_guess(mut self, newton_guess: T) -> Self {
        self.newton_guess = newton_guess;
        self
    }
}

/// Builder for `DeamericaniserConfig`.
///
/// Provides a fluent interface for constructing calibration configurations.
#[derive(Debug, Clone)]
pub struct DeamericaniserConfigBuilder<T: Float> {
    config: DeamericaniserConfig<T>,
}

impl<T: Float> DeamericaniserConfigBuilder<T> {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: DeamericaniserConfig::default(),
        }
    }

    /// Set the fixed-point tolerance.
    pub fn fixed_point_tolerance(mut self, tolerance: T) -> Self {
        self.config.fixed_point_tolerance = tolerance;
        self
    }

    /// Set the maximum fixed-point iterations.
    pub fn fixed_point_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.fixed_point_max_iterations = max_iterations;
        self
    }

    /// Set the lattice depth.
    pub fn lattice_steps(mut self, lattice_steps: usize) -> Self {
        self.config.lattice_steps = lattice_steps;
        self
    }

    /// Set the volatility search bracket.
    pub fn bracket(mut self, bracket: VolatilityBracket<T>) -> Self {
        self.config.bracket = bracket;
        self
    }

    /// Set the bisection solver settings.
    pub fn bisection(mut self, bisection: SolverConfig<T>) -> Self {
        self.config.bisection = bisection;
        self
    }

    /// Set the Newton-Raphson solver settings.
    pub fn newton(mut self, newton: SolverConfig<T>) -> Self {
        self.config.newton = newton;
        self
    }

    /// Set the Newton-Raphson initial guess.
    pub fn newton_guess(mut self, newton_guess: T) -> Self {
        self.config.newton_guess = newton_guess;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DeamericaniserConfig<T> {
        self.config
    }
}

impl<T: Float> Default for DeamericaniserConfigBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default Configuration Tests
    // ========================================

    #[test]
    fn test_default_config() {
        let config: DeamericaniserConfig<f64> = DeamericaniserConfig::default();
        assert!((config.fixed_point_tolerance - 1e-6).abs() < 1e-12);
        assert_eq!(config.fixed_point_max_iterations, 750);
        assert_eq!(config.lattice_steps, 750);
        assert_eq!(config.bracket, VolatilityBracket::default());
        assert!((config.bisection.tolerance - 1e-8).abs() < 1e-14);
        assert_eq!(config.newton.max_iterations, 750);
        assert!((config.newton_guess - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_new_equals_default() {
        let config1: DeamericaniserConfig<f64> = DeamericaniserConfig::new();
        let config2: DeamericaniserConfig<f64> = DeamericaniserConfig::default();
        assert_eq!(config1, config2);
    }

    // ========================================
    // Preset Configuration Tests
    // ========================================

    #[test]
    fn test_high_precision_config() {
        let config: DeamericaniserConfig<f64> = DeamericaniserConfig::high_precision();
        assert!((config.fixed_point_tolerance - 1e-8).abs() < 1e-14);
        assert_eq!(config.lattice_steps, 1500);
        assert!((config.bisection.tolerance - 1e-12).abs() < 1e-18);
        assert_eq!(config.newton.max_iterations, 2000);
        // Untouched fields keep their defaults
        assert_eq!(config.fixed_point_max_iterations, 750);
        assert!((config.newton_guess - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_fast_config() {
        let config: DeamericaniserConfig<f64> = DeamericaniserConfig::fast();
        assert!((config.fixed_point_tolerance - 1e-4).abs() < 1e-10);
        assert_eq!(config.lattice_steps, 200);
        assert!((config.bisection.tolerance - 1e-6).abs() < 1e-12);
        assert_eq!(config.newton.max_iterations, 100);
    }

    // ========================================
    // Builder Tests
    // ========================================

    #[test]
    fn test_builder_defaults() {
        let config = DeamericaniserConfig::<f64>::builder().build();
        assert_eq!(config, DeamericaniserConfig::default());
    }

    #[test]
    fn test_builder_each_field() {
        let bracket = VolatilityBracket::new(0.05_f64, 2.0);
        let solver = SolverConfig {
            tolerance: 1e-10,
            max_iterations: 300,
        };
        let config = DeamericaniserConfig::<f64>::builder()
            .fixed_point_tolerance(1e-5)
            .fixed_point_max_iterations(50)
            .lattice_steps(300)
            .bracket(bracket)
            .bisection(solver)
            .newton(solver)
            .newton_guess(0.3)
            .build();

        assert!((config.fixed_point_tolerance - 1e-5).abs() < 1e-11);
        assert_eq!(config.fixed_point_max_iterations, 50);
        assert_eq!(config.lattice_steps, 300);
        assert_eq!(config.bracket, bracket);
        assert_eq!(config.bisection, solver);
        assert_eq!(config.newton, solver);
        assert!((config.newton_guess - 0.3).abs() < 1e-12);
    }

    // ========================================
    // With-Setter Tests
    // ========================================

    #[test]
    fn test_with_setters_chain() {
        let config = DeamericaniserConfig::<f64>::default()
            .with_fixed_point_tolerance(1e-7)
            .with_fixed_point_max_iterations(100)
            .with_lattice_steps(500)
            .with_bracket(VolatilityBracket::new(0.01, 5.0))
            .with_bisection(SolverConfig::fast())
            .with_newton(SolverConfig::high_precision())
            .with_newton_guess(0.25);

        assert!((config.fixed_point_tolerance - 1e-7).abs() < 1e-13);
        assert_eq!(config.fixed_point_max_iterations, 100);
        assert_eq!(config.lattice_steps, 500);
        assert!((config.bracket.min - 0.01).abs() < 1e-12);
        assert_eq!(config.bisection, SolverConfig::fast());
        assert_eq!(config.newton, SolverConfig::high_precision());
        assert!((config.newton_guess - 0.25).abs() < 1e-12);
    }

    // ========================================
    // Generic Type Tests
    // ========================================

    #[test]
    fn test_f32_config() {
        let config: DeamericaniserConfig<f32> = DeamericaniserConfig::default();
        assert!((config.fixed_point_tolerance - 1e-6_f32).abs() < 1e-9);
        assert_eq!(config.lattice_steps, 750);
    }

    #[test]
    fn test_clone_and_copy() {
        let config: DeamericaniserConfig<f64> = DeamericaniserConfig::default();
        let copied = config;
        assert_eq!(copied, config);
    }
}
