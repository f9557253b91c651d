//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`newton_raphson`]: Fast quadratic convergence when derivative is available
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`Fallback`]: Chains two solvers, trying the second when the first fails
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket with sign change |
//! | Newton → Bisection | Fast | Guaranteed* | Derivative and bracket |
//!
//! *When the bracket contains a sign change.
//!
//! # Example: Loan Rate
//!
//! ```rust
//! use amortize_math::solvers::{BisectionSolver, Fallback, NewtonSolver, Solver, SolverConfig};
//!
//! // Monthly rate at which 12 payments of 88.85 repay 1000
//! let pv = |r: f64| 88.85 * (1.0 - (1.0 + r).powi(-12)) / r - 1000.0;
//! let dpv = |r: f64| {
//!     let h = 1e-7;
//!     (pv(r + h) - pv(r - h)) / (2.0 * h)
//! };
//!
//! let chain = Fallback::new(NewtonSolver, BisectionSolver);
//! let result = chain
//!     .solve(pv, Some(dpv), 0.01, Some((1e-6, 0.5)), &SolverConfig::default())
//!     .unwrap();
//! assert!((result.root * 12.0 - 0.12).abs() < 1e-3);
//! ```

mod bisection;
mod fallback;
mod newton;

pub use bisection::bisection;
pub use fallback::Fallback;
pub use newton::newton_raphson;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// The algorithm that produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Newton-Raphson iteration.
    NewtonRaphson,
    /// Interval bisection.
    Bisection,
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewtonRaphson => write!(f, "Newton-Raphson"),
            Self::Bisection => write!(f, "Bisection"),
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// The algorithm that converged.
    pub method: SolverMethod,
}

/// Passes `value` through, or fails with [`MathError::NonFinite`] naming `operation`.
pub(crate) fn finite(value: f64, operation: &'static str) -> MathResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::non_finite(operation))
    }
}

/// Trait for root-finding solvers with optional derivative.
///
/// This trait provides a unified interface for all solvers, allowing
/// the caller to optionally provide a derivative function and a bracket.
/// Solvers that cannot work with what they are given return
/// [`MathError::InvalidInput`].
///
/// # Example
///
/// ```rust
/// use amortize_math::solvers::{Solver, NewtonSolver, SolverConfig};
///
/// let solver = NewtonSolver;
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = solver.solve(f, Some(df), 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of the given function.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `derivative` - Optional derivative function
    /// * `initial_guess` - Starting point for the search
    /// * `bounds` - Optional bracketing interval (a, b)
    /// * `config` - Solver configuration
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
        D: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Newton-Raphson solver implementation.
///
/// Requires an analytic derivative.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl Solver for NewtonSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        _bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => newton_raphson(f, df, initial_guess, config),
            None => Err(MathError::invalid_input(
                "Newton-Raphson requires a derivative",
            )),
        }
    }

    fn name(&self) -> &'static str {
        "Newton-Raphson"
    }
}

/// Bisection solver implementation.
///
/// Requires a bracketing interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        _initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match bounds {
            Some((a, b)) => bisection(f, a, b, config),
            None => Err(MathError::invalid_input("Bisection requires a bracket")),
        }
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}
