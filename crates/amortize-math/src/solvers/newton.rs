//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{finite, SolverConfig, SolverMethod, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function. Convergence is declared when either
/// `|f(x)|` or the last step falls below the configured tolerance.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if convergence fails.
///
/// # Example
///
/// ```rust
/// use amortize_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let converged = |root: f64, iterations: u32, residual: f64| SolverResult {
        root,
        iterations,
        residual,
        method: SolverMethod::NewtonRaphson,
    };

    let mut x = initial_guess;
    for iteration in 0..config.max_iterations {
        let fx = finite(f(x), "Newton-Raphson function value")?;
        if fx.abs() < config.tolerance {
            return Ok(converged(x, iteration, fx));
        }

        let step = newton_step(fx, df(x))?;
        x = finite(x - step, "Newton-Raphson iterate")?;
        if step.abs() < config.tolerance {
            return Ok(converged(x, iteration + 1, f(x)));
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, f(x).abs()))
}

/// Derivatives flatter than this are treated as zero.
const MIN_DERIVATIVE: f64 = 1e-15;

/// The Newton correction `f(x) / f'(x)`.
fn newton_step(fx: f64, dfx: f64) -> MathResult<f64> {
    if dfx.abs() < MIN_DERIVATIVE {
        return Err(MathError::DivisionByZero { value: dfx });
    }
    Ok(fx / dfx)
}
