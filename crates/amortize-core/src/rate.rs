//! Interest-rate root finder.
//!
//! The annuity identity `payment ((1+r)^n - 1) = P r (1+r)^n` has no closed
//! form in `r` for realistic terms. Expanding both sides binomially and
//! dividing through by `r` (which removes the trivial root `r = 0`) gives a
//! degree-`n` polynomial
//!
//! ```text
//! f(r) = sum_{j=0}^{n-1} (payment C(n, j+1) - P C(n, j)) r^j  -  P r^n
//! ```
//!
//! whose positive root is the monthly rate. It is found with Newton-Raphson
//! from a fixed seed, falling back to bisection on a bracket, and scaled by
//! 12 to a nominal annual rate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use amortize_math::polynomial::{binomial_row, Polynomial};
use amortize_math::solvers::{BisectionSolver, Fallback, NewtonSolver, Solver, SolverMethod};

use crate::annuity::MONTHS_PER_YEAR;
use crate::config::RateSolverConfig;
use crate::error::{LoanError, LoanResult};

/// Newton-Raphson with a bisection fallback.
pub type RateFinder = Fallback<NewtonSolver, BisectionSolver>;

/// Outcome of a rate search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSolution {
    /// Converged monthly rate.
    pub monthly_rate: f64,
    /// `12 * monthly_rate`.
    pub annual_rate: f64,
    /// Method that converged.
    pub method: SolverMethod,
    /// Iterations used by the converging method.
    pub iterations: u32,
    /// Polynomial value at the root.
    pub residual: f64,
}

/// Builds the annuity polynomial for a loan with unknown rate.
///
/// Coefficients are in ascending order of power: `c_j = payment C(n, j+1) - P C(n, j)`
/// for `j < n` and `c_n = -P`.
///
/// # Example
///
/// ```rust
/// use amortize_core::rate::annuity_polynomial;
///
/// // One payment of 1010 on 1000: 1010 - 1000 - 1000 r = 0 at r = 1%
/// let poly = annuity_polynomial(1000.0, 1010.0, 1);
/// assert_eq!(poly.coefficients(), &[10.0, -1000.0]);
/// assert!(poly.evaluate(0.01).abs() < 1e-9);
/// ```
#[must_use]
pub fn annuity_polynomial(principal: f64, monthly_payment: f64, term_months: u32) -> Polynomial {
    let binomials = binomial_row(term_months);
    let mut coefficients: Vec<f64> = binomials
        .windows(2)
        .map(|pair| monthly_payment * pair[1] - principal * pair[0])
        .collect();
    coefficients.push(-principal);
    Polynomial::new(coefficients)
}

/// Solves for the nominal annual rate with the default Newton then bisection chain.
///
/// # Errors
///
/// Returns [`LoanError::RootFinding`] when the polynomial cannot be represented
/// in double precision or when both methods fail.
pub fn solve_annual_rate(
    principal: f64,
    monthly_payment: f64,
    term_months: u32,
    config: &RateSolverConfig,
) -> LoanResult<RateSolution> {
    let finder = RateFinder::new(NewtonSolver, BisectionSolver);
    solve_annual_rate_with(&finder, principal, monthly_payment, term_months, config)
}

/// Solves for the nominal annual rate with a caller-supplied solver.
pub fn solve_annual_rate_with<S: Solver>(
    solver: &S,
    principal: f64,
    monthly_payment: f64,
    term_months: u32,
    config: &RateSolverConfig,
) -> LoanResult<RateSolution> {
    let poly = annuity_polynomial(principal, monthly_payment, term_months);
    if !poly.is_finite() {
        return Err(LoanError::RootFinding {
            reason: format!(
                "a {term_months}-month term overflows the annuity polynomial coefficients"
            ),
        });
    }
    let deriv = poly.derivative();

    let result = solver.solve(
        |r| poly.evaluate(r),
        Some(|r| deriv.evaluate(r)),
        config.initial_guess,
        Some(config.bounds()),
        &config.solver_config(),
    )?;

    debug!(
        method = %result.method,
        iterations = result.iterations,
        monthly_rate = result.root,
        "rate search converged"
    );

    Ok(RateSolution {
        monthly_rate: result.root,
        annual_rate: result.root * MONTHS_PER_YEAR,
        method: result.method,
        iterations: result.iterations,
        residual: result.residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::payment_from_principal;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_root_is_monthly_rate() {
        let payment = payment_from_principal(10_000.0, 0.06, 60);
        let poly = annuity_polynomial(10_000.0, payment, 60);

        assert_eq!(poly.degree(), 60);
        assert!(poly.evaluate(0.005).abs() < 1e-6);
    }

    #[test]
    fn test_polynomial_matches_closed_form_identity() {
        let (principal, payment, n) = (50_000.0, 700.0, 84_u32);
        let poly = annuity_polynomial(principal, payment, n);

        let r = 0.0071_f64;
        let growth = (1.0 + r).powi(n as i32);
        let identity = (payment * (growth - 1.0) - principal * r * growth) / r;
        assert_relative_eq!(poly.evaluate(r), identity, max_relative = 1e-9);
    }

    #[test]
    fn test_short_term_converges_with_newton() {
        let payment = payment_from_principal(10_000.0, 0.06, 60);
        let solution =
            solve_annual_rate(10_000.0, payment, 60, &RateSolverConfig::default()).unwrap();

        assert_eq!(solution.method, SolverMethod::NewtonRaphson);
        assert_relative_eq!(solution.annual_rate, 0.06, epsilon = 1e-9);
        assert_relative_eq!(solution.monthly_rate * 12.0, solution.annual_rate);
    }

    #[test]
    fn test_thirty_year_term_falls_back_to_bisection() {
        // From a 0.5 seed Newton needs well over 100 steps for n = 360
        let payment = payment_from_principal(200_000.0, 0.045, 360);
        let solution =
            solve_annual_rate(200_000.0, payment, 360, &RateSolverConfig::default()).unwrap();

        assert_eq!(solution.method, SolverMethod::Bisection);
        assert_relative_eq!(solution.annual_rate, 0.045, epsilon = 1e-9);
    }

    #[test]
    fn test_closer_seed_keeps_newton_for_long_terms() {
        let payment = payment_from_principal(200_000.0, 0.045, 360);
        let config = RateSolverConfig::default().with_initial_guess(0.01);
        let solution = solve_annual_rate(200_000.0, payment, 360, &config).unwrap();

        assert_eq!(solution.method, SolverMethod::NewtonRaphson);
        assert_relative_eq!(solution.annual_rate, 0.045, epsilon = 1e-9);
    }

    #[test]
    fn test_single_payment_loan() {
        let solution =
            solve_annual_rate(30_000.0, 30_200.0, 1, &RateSolverConfig::default()).unwrap();
        assert_relative_eq!(solution.annual_rate, 0.08, epsilon = 1e-9);
    }

    #[test]
    fn test_both_methods_failing_is_root_finding_error() {
        // Newton gets one step; the bracket holds no sign change
        let payment = payment_from_principal(200_000.0, 0.045, 360);
        let config = RateSolverConfig::default()
            .with_max_iterations(1)
            .with_bracket(0.5, 1.0);

        let err = solve_annual_rate(200_000.0, payment, 360, &config).unwrap_err();
        assert!(matches!(err, LoanError::RootFinding { .. }));
    }

    #[test]
    fn test_overflowing_term_is_rejected() {
        let err = solve_annual_rate(1e6, 5_000.0, 1_200, &RateSolverConfig::default()).unwrap_err();
        match err {
            LoanError::RootFinding { reason } => assert!(reason.contains("1200-month")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_injected_solver_is_used() {
        let payment = payment_from_principal(10_000.0, 0.06, 60);
        let solution = solve_annual_rate_with(
            &BisectionSolver,
            10_000.0,
            payment,
            60,
            &RateSolverConfig::default(),
        )
        .unwrap();

        assert_eq!(solution.method, SolverMethod::Bisection);
        assert_relative_eq!(solution.annual_rate, 0.06, epsilon = 1e-9);
    }
}
