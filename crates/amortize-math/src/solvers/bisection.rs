//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{finite, SolverConfig, SolverMethod, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if the bracket is invalid
/// or the interval has not shrunk below the tolerance within the iteration cap.
///
/// # Example
///
/// ```rust
/// use amortize_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let found = |root: f64, iterations: u32, residual: f64| SolverResult {
        root,
        iterations,
        residual,
        method: SolverMethod::Bisection,
    };

    let (lo, hi) = (a.min(b), a.max(b));
    let f_lo = finite(f(lo), "bisection bracket endpoint")?;
    let f_hi = finite(f(hi), "bisection bracket endpoint")?;

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if let Some((root, residual)) = [(lo, f_lo), (hi, f_hi)]
        .into_iter()
        .find(|(_, fx)| fx.abs() < config.tolerance)
    {
        return Ok(found(root, 0, residual));
    }

    let mut bracket = Bracket { lo, hi, f_lo };
    for iteration in 1..=config.max_iterations {
        let mid = bracket.midpoint();
        let f_mid = f(mid);
        if f_mid.abs() < config.tolerance || bracket.half_width() < config.tolerance {
            return Ok(found(mid, iteration, f_mid));
        }
        bracket.narrow(mid, f_mid);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(bracket.midpoint()).abs(),
    ))
}

/// An interval `[lo, hi]` over which the function changes sign.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    lo: f64,
    hi: f64,
    f_lo: f64,
}

impl Bracket {
    fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    fn half_width(&self) -> f64 {
        0.5 * (self.hi - self.lo)
    }

    /// Keeps the half that still contains the sign change.
    fn narrow(&mut self, mid: f64, f_mid: f64) {
        if f_mid * self.f_lo < 0.0 {
            self.hi = mid;
        } else {
            self.lo = mid;
            self.f_lo = f_mid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(result.method, SolverMethod::Bisection);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Reversed bracket should still work
        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-10);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_too_few_iterations() {
        let f = |x: f64| x - 0.123_456_789;

        let config = SolverConfig::new(1e-12, 5);
        let result = bisection(f, 0.0, 1.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }

    #[test]
    fn test_bracket_keeps_sign_change() {
        let mut bracket = Bracket {
            lo: 0.0,
            hi: 1.0,
            f_lo: -1.0,
        };
        bracket.narrow(0.5, -0.2);
        assert_eq!((bracket.lo, bracket.hi, bracket.f_lo), (0.5, 1.0, -0.2));
        bracket.narrow(0.75, 0.3);
        assert_eq!((bracket.lo, bracket.hi), (0.5, 0.75));
        assert_relative_eq!(bracket.half_width(), 0.125);
    }

    #[test]
    fn test_non_finite_endpoint() {
        let f = |x: f64| 1.0 / x;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::NonFinite { .. })));
    }
}
