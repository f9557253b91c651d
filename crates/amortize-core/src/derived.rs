//! Constructors that derive loan inputs from related quantities.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::config::ResolverConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{LoanError, LoanResult};
use crate::loan::LoanParameters;
use crate::resolver;
use crate::validation::{validate, LoanField, LoanInputs};

/// A loan whose rate makes total interest equal a fixed cap.
///
/// Any market rate below [`annual_rate`](Self::annual_rate) costs less than
/// the cap over the same term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakevenRate {
    loan: LoanParameters,
    interest_cap: f64,
}

impl BreakevenRate {
    /// The resolved loan.
    #[must_use]
    pub fn loan(&self) -> &LoanParameters {
        &self.loan
    }

    /// Total interest allowed over the term.
    #[must_use]
    pub fn interest_cap(&self) -> f64 {
        self.interest_cap
    }

    /// The breakeven nominal annual rate.
    #[must_use]
    pub fn annual_rate(&self) -> f64 {
        self.loan.annual_rate()
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BreakevenRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loan of {:.2} with interest capped at {:.2} ({:.2} repaid in total) over {} months \
             at {:.2} a month breaks even at an annual rate of {:.3}%",
            self.loan.principal(),
            self.interest_cap,
            self.loan.principal() + self.interest_cap,
            self.loan.term_months(),
            self.loan.monthly_payment(),
            self.loan.annual_rate() * 100.0
        )
    }
}

impl LoanParameters {
    /// Finds the annual rate at which total interest over `term_months`
    /// equals `interest_cap`.
    ///
    /// The payment is `(principal + interest_cap) / term_months` and the rate
    /// is solved numerically.
    ///
    /// # Errors
    ///
    /// - [`LoanError::InvalidParameter`] for an invalid principal or term, or a
    ///   negative or non-finite cap
    /// - [`LoanError::RootFinding`] when the rate search fails
    ///
    /// # Example
    ///
    /// ```rust
    /// use amortize_core::prelude::*;
    ///
    /// let breakeven = LoanParameters::resolve_breakeven_rate(100_000.0, 60, 20_000.0).unwrap();
    /// assert!((breakeven.annual_rate() - 0.0742).abs() < 1e-4);
    /// assert!(breakeven.summary().ends_with("7.420%"));
    /// ```
    pub fn resolve_breakeven_rate(
        principal: f64,
        term_months: u32,
        interest_cap: f64,
    ) -> LoanResult<BreakevenRate> {
        Self::resolve_breakeven_rate_with(
            principal,
            term_months,
            interest_cap,
            &ResolverConfig::default(),
        )
    }

    /// As [`resolve_breakeven_rate`](Self::resolve_breakeven_rate) with an
    /// explicit configuration.
    pub fn resolve_breakeven_rate_with(
        principal: f64,
        term_months: u32,
        interest_cap: f64,
        config: &ResolverConfig,
    ) -> LoanResult<BreakevenRate> {
        validate(LoanField::Principal, principal)?;
        validate(LoanField::TermMonths, f64::from(term_months))?;
        if !(interest_cap.is_finite() && interest_cap >= 0.0) {
            return Err(LoanError::invalid_parameter(
                "interest_cap",
                "must be a finite number, zero or above",
            ));
        }

        let monthly_payment = (principal + interest_cap) / f64::from(term_months);
        let inputs = LoanInputs::new()
            .with_principal(principal)
            .with_monthly_payment(monthly_payment)
            .with_term_months(term_months);
        let loan = resolver::resolve(&inputs, config, Vec::new())?;

        let breakeven = BreakevenRate { loan, interest_cap };
        info!(
            annual_rate = breakeven.annual_rate(),
            "{}",
            breakeven.summary()
        );
        Ok(breakeven)
    }

    /// Resolves a loan whose principal is `total_price - down_payment`.
    ///
    /// `inputs` supplies the remaining fields (two of rate, payment and
    /// term, or all three). A principal in `inputs` is replaced and reported
    /// as [`Diagnostic::PrincipalOverwritten`].
    ///
    /// # Errors
    ///
    /// [`LoanError::InvalidParameter`] when either amount is not positive or
    /// the down payment is not below the total, plus anything
    /// [`construct`](Self::construct) returns.
    pub fn from_total_and_down_payment(
        total_price: f64,
        down_payment: f64,
        inputs: LoanInputs,
    ) -> LoanResult<Self> {
        Self::from_total_and_down_payment_with(
            total_price,
            down_payment,
            inputs,
            &ResolverConfig::default(),
        )
    }

    /// As [`from_total_and_down_payment`](Self::from_total_and_down_payment)
    /// with an explicit configuration.
    pub fn from_total_and_down_payment_with(
        total_price: f64,
        down_payment: f64,
        mut inputs: LoanInputs,
        config: &ResolverConfig,
    ) -> LoanResult<Self> {
        if !(total_price.is_finite() && total_price > 0.0) {
            return Err(LoanError::invalid_parameter(
                "total_price",
                "must be a finite number above zero",
            ));
        }
        if !(down_payment.is_finite() && down_payment > 0.0) {
            return Err(LoanError::invalid_parameter(
                "down_payment",
                "must be a finite number above zero",
            ));
        }
        if down_payment >= total_price {
            return Err(LoanError::invalid_parameter(
                "down_payment",
                format!("must be less than total_price ({total_price})"),
            ));
        }

        let principal = total_price - down_payment;
        let mut diagnostics = Vec::new();
        if let Some(supplied) = inputs.principal {
            Diagnostic::PrincipalOverwritten {
                supplied,
                derived: principal,
            }
            .raise(&mut diagnostics);
        }
        inputs.principal = Some(principal);

        resolver::resolve(&inputs, config, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::payment_from_principal;
    use crate::diagnostics::RateAssessment;
    use amortize_math::solvers::SolverMethod;
    use approx::assert_relative_eq;

    #[test]
    fn test_breakeven_total_interest_equals_cap() {
        let breakeven = LoanParameters::resolve_breakeven_rate(100_000.0, 60, 20_000.0).unwrap();

        assert_relative_eq!(breakeven.annual_rate(), 0.074_200_957_9, epsilon = 1e-9);
        assert_relative_eq!(breakeven.loan().monthly_payment(), 2_000.0);
        assert_relative_eq!(breakeven.loan().total_interest(), 20_000.0, epsilon = 1e-6);
        assert_eq!(breakeven.interest_cap(), 20_000.0);
    }

    #[test]
    fn test_breakeven_long_term_uses_bisection() {
        let breakeven =
            LoanParameters::resolve_breakeven_rate(200_000.0, 360, 100_000.0).unwrap();
        let solution = breakeven.loan().resolution().rate_solution.unwrap();

        assert_eq!(solution.method, SolverMethod::Bisection);
        assert_relative_eq!(breakeven.annual_rate(), 0.029_081_526_15, epsilon = 1e-9);
    }

    #[test]
    fn test_breakeven_summary() {
        let breakeven = LoanParameters::resolve_breakeven_rate(100_000.0, 60, 20_000.0).unwrap();
        let summary = breakeven.summary();

        assert!(summary.contains("100000.00"));
        assert!(summary.contains("20000.00"));
        assert!(summary.contains("120000.00 repaid"));
        assert!(summary.contains("60 months"));
        assert!(summary.contains("2000.00 a month"));
        assert!(summary.ends_with("7.420%"));
    }

    #[test]
    fn test_zero_cap_is_a_zero_rate() {
        let breakeven = LoanParameters::resolve_breakeven_rate(200_000.0, 360, 0.0).unwrap();

        assert!(breakeven.annual_rate().abs() < 1e-12);
        assert!(matches!(
            breakeven.loan().diagnostics(),
            [Diagnostic::ImplausibleRate {
                assessment: RateAssessment::Low,
                ..
            }]
        ));
    }

    #[test]
    fn test_breakeven_rejects_bad_inputs() {
        let negative_cap = LoanParameters::resolve_breakeven_rate(1_000.0, 12, -1.0).unwrap_err();
        assert!(matches!(negative_cap, LoanError::InvalidParameter { ref field, .. } if field == "interest_cap"));

        let nan_cap = LoanParameters::resolve_breakeven_rate(1_000.0, 12, f64::NAN).unwrap_err();
        assert!(matches!(nan_cap, LoanError::InvalidParameter { .. }));

        let zero_term = LoanParameters::resolve_breakeven_rate(1_000.0, 0, 100.0).unwrap_err();
        assert!(matches!(zero_term, LoanError::InvalidParameter { ref field, .. } if field == "term_months"));

        let zero_principal = LoanParameters::resolve_breakeven_rate(0.0, 12, 100.0).unwrap_err();
        assert!(matches!(zero_principal, LoanError::InvalidParameter { ref field, .. } if field == "principal"));
    }

    #[test]
    fn test_down_payment_scenario() {
        let loan = LoanParameters::from_total_and_down_payment(
            300_000.0,
            60_000.0,
            LoanInputs::new().with_annual_rate(0.04).with_term_months(360),
        )
        .unwrap();

        assert_eq!(loan.principal(), 240_000.0);
        assert_relative_eq!(
            loan.monthly_payment(),
            payment_from_principal(240_000.0, 0.04, 360)
        );
        assert!(loan.diagnostics().is_empty());
    }

    #[test]
    fn test_down_payment_overwrites_principal() {
        let loan = LoanParameters::from_total_and_down_payment(
            300_000.0,
            60_000.0,
            LoanInputs::new()
                .with_principal(1.0)
                .with_annual_rate(0.04)
                .with_term_months(360),
        )
        .unwrap();

        assert_eq!(loan.principal(), 240_000.0);
        assert_eq!(
            loan.diagnostics(),
            &[Diagnostic::PrincipalOverwritten {
                supplied: 1.0,
                derived: 240_000.0
            }]
        );
    }

    #[test]
    fn test_down_payment_bounds() {
        let rest = LoanInputs::new().with_annual_rate(0.04).with_term_months(360);

        let err = LoanParameters::from_total_and_down_payment(300_000.0, 300_000.0, rest.clone())
            .unwrap_err();
        assert!(matches!(err, LoanError::InvalidParameter { ref field, .. } if field == "down_payment"));

        let err =
            LoanParameters::from_total_and_down_payment(300_000.0, 0.0, rest.clone()).unwrap_err();
        assert!(matches!(err, LoanError::InvalidParameter { ref field, .. } if field == "down_payment"));

        let err = LoanParameters::from_total_and_down_payment(-1.0, 10.0, rest).unwrap_err();
        assert!(matches!(err, LoanError::InvalidParameter { ref field, .. } if field == "total_price"));
    }

    #[test]
    fn test_down_payment_still_needs_two_more_fields() {
        let err = LoanParameters::from_total_and_down_payment(
            300_000.0,
            60_000.0,
            LoanInputs::new().with_term_months(360),
        )
        .unwrap_err();
        assert!(matches!(err, LoanError::InsufficientParameters { .. }));
    }
}
