//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that solver types are accessible via absolute path.
#[test]
fn test_solver_module_exports() {
    use devol_core::math::solvers::BisectionSolver;
    use devol_core::math::solvers::NewtonRaphsonSolver;
    use devol_core::math::solvers::SolverConfig;

    let config: SolverConfig<f64> = SolverConfig::default();

    // Find root of f(x) = x^2 - 4 with both solvers
    let bisection = BisectionSolver::new(config);
    let result = bisection.find_root(|x: f64| x * x - 4.0, 0.0, 5.0);
    assert!(result.is_ok());
    assert!((result.unwrap().root - 2.0).abs() < 1e-7);

    let newton = NewtonRaphsonSolver::new(config);
    let result = newton.find_root(|x: f64| x * x - 4.0, |x| 2.0 * x, 3.0);
    assert!(result.is_ok());
    assert!((result.unwrap().root - 2.0).abs() < 1e-8);
}

/// Test that solver results expose convergence diagnostics.
#[test]
fn test_root_result_exports() {
    use devol_core::math::solvers::{BisectionSolver, RootResult, SolverKind};

    let solver = BisectionSolver::with_defaults();
    let result: RootResult<f64> = solver.find_root(|x: f64| x - 1.0, 0.0, 2.0).unwrap();

    assert!(result.iterations <= 750);
    assert!(result.residual.abs() < 1e-7);

    let kind = SolverKind::Bisection;
    assert_eq!(kind.to_string(), "bisection");
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use devol_core::types::time::Date;
    use devol_core::types::time::DayCountConvention;

    let start = Date::from_ymd(2024, 1, 1).unwrap();
    let end = Date::from_ymd(2024, 7, 1).unwrap();

    assert_eq!(start.year(), 2024);
    assert_eq!(start.month(), 1);
    assert_eq!(start.day(), 1);

    let act_365 = DayCountConvention::ActualActual365;
    let yf = act_365.year_fraction(start, end);
    assert!((yf - 0.4986).abs() < 0.001);
}

/// Test that types re-exports work at module level.
#[test]
fn test_types_reexports() {
    use devol_core::types::Date;
    use devol_core::types::DateError;
    use devol_core::types::DayCountConvention;
    use devol_core::types::SolverError;

    let _date = Date::from_ymd(2024, 6, 15).unwrap();
    let _dcc = DayCountConvention::ActualActual365;
    let _date_err = DateError::InvalidDate {
        year: 2024,
        month: 13,
        day: 1,
    };
    let _solver_err = SolverError::MaxIterationsExceeded {
        iterations: 750,
        residual: 1e-3,
    };
}

/// Test that all DayCountConvention variants are accessible.
#[test]
fn test_day_count_convention_variants() {
    use devol_core::types::time::DayCountConvention;

    let conventions = [
        DayCountConvention::ActualActual365,
        DayCountConvention::ActualActual360,
        DayCountConvention::Thirty360,
    ];

    for conv in &conventions {
        let name = conv.name();
        assert!(!name.is_empty());
    }
}

/// Test that all main modules are public.
#[test]
fn test_main_module_structure() {
    use devol_core::math;
    use devol_core::types;

    let solver = math::solvers::BisectionSolver::<f64>::with_defaults();
    let _ = solver.find_root(|x| x - 0.5, 0.0, 1.0);
    let _ = types::Date::from_ymd(2024, 1, 1);
}
