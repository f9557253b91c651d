//! Closed-form annuity solvers.
//!
//! With monthly rate `r = annual_rate / 12` and term `n`:
//!
//! - payment: `P r (1+r)^n / ((1+r)^n - 1)`
//! - principal: `payment ((1+r)^n - 1) / (r (1+r)^n)`
//! - term: `-ln(1 - r P / payment) / ln(1 + r)`

use crate::config::TermRounding;
use crate::error::{LoanError, LoanResult};
use crate::validation::LoanField;

/// Number of compounding periods per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Converts a nominal annual rate to the monthly periodic rate.
#[inline]
#[must_use]
pub fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / MONTHS_PER_YEAR
}

/// `(1+r)^periods - 1`, kept accurate when `r` is close to zero.
#[inline]
pub(crate) fn compound_growth(r: f64, periods: f64) -> f64 {
    (periods * r.ln_1p()).exp_m1()
}

/// Fixed monthly payment that amortizes `principal` over `term_months`.
///
/// # Example
///
/// ```rust
/// use amortize_core::annuity::payment_from_principal;
///
/// let payment = payment_from_principal(240_000.0, 0.04, 360);
/// assert!((payment - 1_145.80).abs() < 0.01);
/// ```
#[must_use]
pub fn payment_from_principal(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    let r = monthly_rate(annual_rate);
    let accrued = compound_growth(r, f64::from(term_months));
    principal * r * (accrued + 1.0) / accrued
}

/// Principal that `monthly_payment` amortizes over `term_months`.
#[must_use]
pub fn principal_from_payment(monthly_payment: f64, annual_rate: f64, term_months: u32) -> f64 {
    let r = monthly_rate(annual_rate);
    let accrued = compound_growth(r, f64::from(term_months));
    monthly_payment * accrued / (r * (accrued + 1.0))
}

/// Number of whole months needed for `monthly_payment` to repay `principal`.
///
/// The fractional result of the log formula is rounded with `rounding`
/// (truncation by default, which can understate the term by one month).
///
/// # Errors
///
/// - [`LoanError::NonAmortizing`] when the payment does not exceed the
///   first month's interest.
/// - [`LoanError::InvalidParameter`] on `term_months` when the rounded term
///   is below one month or does not fit a month count.
pub fn term_from_principal(
    principal: f64,
    monthly_payment: f64,
    annual_rate: f64,
    rounding: TermRounding,
) -> LoanResult<u32> {
    let r = monthly_rate(annual_rate);
    let first_interest = r * principal;
    let ratio = first_interest / monthly_payment;

    if ratio >= 1.0 {
        return Err(LoanError::NonAmortizing {
            monthly_payment,
            first_interest,
        });
    }

    let months = -(-ratio).ln_1p() / r.ln_1p();
    let rounded = rounding.apply(months);

    if !rounded.is_finite() || rounded < 1.0 {
        return Err(LoanError::invalid_parameter(
            LoanField::TermMonths.name(),
            format!("derived term of {months:.4} months rounds below one month"),
        ));
    }
    if rounded > f64::from(u32::MAX) {
        return Err(LoanError::invalid_parameter(
            LoanField::TermMonths.name(),
            format!("derived term of {months:.0} months is too long"),
        ));
    }

    Ok(rounded as u32)
}
