//! Solver fallback chain.

use tracing::debug;

use crate::error::MathResult;
use crate::solvers::{Solver, SolverConfig, SolverResult};

/// Runs a primary solver and, if it fails for any reason, a secondary one.
///
/// The secondary solver sees the same function, derivative, initial guess,
/// bracket and configuration as the primary. When both fail, the secondary
/// solver's error is returned. Chains nest: `Fallback::new(a, Fallback::new(b, c))`.
///
/// # Example
///
/// ```rust
/// use amortize_math::solvers::{
///     BisectionSolver, Fallback, NewtonSolver, Solver, SolverConfig, SolverMethod,
/// };
///
/// // Newton diverges on a cube root; bisection takes over.
/// let f = |x: f64| (x - 0.3).cbrt();
/// let df = |x: f64| (1.0 / 3.0) * (x - 0.3).abs().powf(-2.0 / 3.0);
///
/// let chain = Fallback::new(NewtonSolver, BisectionSolver);
/// let result = chain
///     .solve(f, Some(df), 0.5, Some((0.0, 1.0)), &SolverConfig::default())
///     .unwrap();
/// assert_eq!(result.method, SolverMethod::Bisection);
/// assert!((result.root - 0.3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    /// Creates a chain that tries `primary` first and `secondary` on failure.
    #[must_use]
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: Solver, S: Solver> Solver for Fallback<P, S> {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match self
            .primary
            .solve(&f, derivative.as_ref(), initial_guess, bounds, config)
        {
            Ok(result) => Ok(result),
            Err(err) => {
                debug!(
                    primary = self.primary.name(),
                    secondary = self.secondary.name(),
                    error = %err,
                    "primary solver failed, falling back"
                );
                self.secondary
                    .solve(&f, derivative.as_ref(), initial_guess, bounds, config)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use crate::solvers::{BisectionSolver, NewtonSolver, SolverMethod};
    use approx::assert_relative_eq;
    use std::cell::Cell;

    fn cube_root_at(a: f64) -> (impl Fn(f64) -> f64, impl Fn(f64) -> f64) {
        let f = move |x: f64| (x - a).cbrt();
        let df = move |x: f64| (1.0 / 3.0) * (x - a).abs().powf(-2.0 / 3.0);
        (f, df)
    }

    #[test]
    fn test_primary_success_skips_secondary() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let chain = Fallback::new(NewtonSolver, BisectionSolver);
        let result = chain
            .solve(f, Some(df), 1.5, Some((1.0, 2.0)), &SolverConfig::default())
            .unwrap();

        assert_eq!(result.method, SolverMethod::NewtonRaphson);
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_non_convergent_primary_triggers_fallback() {
        let (f, df) = cube_root_at(0.3);

        let chain = Fallback::new(NewtonSolver, BisectionSolver);
        let result = chain
            .solve(f, Some(df), 0.5, Some((0.0, 1.0)), &SolverConfig::default())
            .unwrap();

        assert_eq!(result.method, SolverMethod::Bisection);
        assert_relative_eq!(result.root, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_secondary_error_surfaces_when_both_fail() {
        let (f, df) = cube_root_at(0.3);

        // Bracket without a sign change
        let chain = Fallback::new(NewtonSolver, BisectionSolver);
        let result = chain.solve(f, Some(df), 0.5, Some((0.5, 1.0)), &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_secondary_sees_same_function() {
        let calls = Cell::new(0_u32);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x - 0.25
        };
        let no_deriv: Option<fn(f64) -> f64> = None;

        // Newton rejects the missing derivative without evaluating f
        let chain = Fallback::new(NewtonSolver, BisectionSolver);
        let result = chain
            .solve(f, no_deriv, 0.5, Some((0.0, 1.0)), &SolverConfig::default())
            .unwrap();

        assert_eq!(result.method, SolverMethod::Bisection);
        assert_relative_eq!(result.root, 0.25, epsilon = 1e-10);
        assert!(calls.get() > 0);
    }

    #[test]
    fn test_chains_nest() {
        let (f, df) = cube_root_at(0.7);

        let chain = Fallback::new(NewtonSolver, Fallback::new(NewtonSolver, BisectionSolver));
        let result = chain
            .solve(f, Some(df), 0.5, Some((0.0, 1.0)), &SolverConfig::default())
            .unwrap();

        assert_eq!(result.method, SolverMethod::Bisection);
        assert_relative_eq!(result.root, 0.7, epsilon = 1e-9);
    }
}
