//! Dense univariate polynomials.
//!
//! Coefficients are stored in ascending order of power, so `coefficients[k]`
//! multiplies `x^k`.

use serde::{Deserialize, Serialize};

/// A dense polynomial with `f64` coefficients.
///
/// # Example
///
/// ```rust
/// use amortize_math::polynomial::Polynomial;
///
/// // 1 - 3x + 2x^2 = (1 - x)(1 - 2x)
/// let p = Polynomial::new(vec![1.0, -3.0, 2.0]);
/// assert_eq!(p.degree(), 2);
/// assert!(p.evaluate(1.0).abs() < 1e-15);
/// assert!((p.derivative().evaluate(1.0) - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from ascending-order coefficients.
    ///
    /// Trailing zero coefficients are dropped so that [`degree`](Self::degree)
    /// reports the true degree. An empty vector is the zero polynomial.
    #[must_use]
    pub fn new(mut coefficients: Vec<f64>) -> Self {
        while coefficients.len() > 1 && coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(0.0);
        }
        Self { coefficients }
    }

    /// Returns the coefficients in ascending order of power.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial (0 for constants, including zero).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Returns true if every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// Returns the analytic first derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.coefficients.len() == 1 {
            return Self::new(vec![0.0]);
        }
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| k as f64 * c)
            .collect();
        Self::new(coefficients)
    }
}

/// Returns the binomial coefficients `C(n, 0), C(n, 1), ..., C(n, n)`.
///
/// Computed with the multiplicative recurrence `C(n, k+1) = C(n, k) (n-k) / (k+1)`
/// in floating point. Entries overflow to infinity once `C(n, k)` exceeds
/// `f64::MAX` (around `n = 1030`); callers that need finite values should
/// check with [`Polynomial::is_finite`] or `f64::is_finite`.
///
/// # Example
///
/// ```rust
/// use amortize_math::polynomial::binomial_row;
///
/// assert_eq!(binomial_row(4), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
/// ```
#[must_use]
pub fn binomial_row(n: u32) -> Vec<f64> {
    let n_f = f64::from(n);
    let mut row = Vec::with_capacity(n as usize + 1);
    let mut current = 1.0_f64;
    row.push(current);
    for k in 0..n {
        let k_f = f64::from(k);
        current = current * (n_f - k_f) / (k_f + 1.0);
        row.push(current);
    }
    row
}
