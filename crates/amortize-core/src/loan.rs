//! Resolved loan parameters and the amortization engine.

use serde::Serialize;

use crate::annuity::{compound_growth, monthly_rate};
use crate::config::ResolverConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{LoanError, LoanResult};
use crate::resolver::{self, Resolution};
use crate::validation::LoanInputs;

/// A fully determined fixed-rate loan.
///
/// Built by [`construct`](Self::construct) from any three of the four
/// quantities; the fourth is derived. Values are read-only afterwards.
///
/// # Example
///
/// ```rust
/// use amortize_core::prelude::*;
///
/// let loan = LoanParameters::construct(
///     LoanInputs::new()
///         .with_principal(240_000.0)
///         .with_annual_rate(0.04)
///         .with_term_months(360),
/// )
/// .unwrap();
///
/// assert!((loan.monthly_payment() - 1_145.80).abs() < 0.01);
/// assert!((loan.interest_for_month(1).unwrap() - 800.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanParameters {
    principal: f64,
    annual_rate: f64,
    monthly_payment: f64,
    term_months: u32,
    resolution: Resolution,
    diagnostics: Vec<Diagnostic>,
}

impl LoanParameters {
    /// Resolves `inputs` with the default [`ResolverConfig`].
    ///
    /// # Errors
    ///
    /// - [`LoanError::InvalidParameter`] when a supplied value is out of range
    /// - [`LoanError::InsufficientParameters`] when fewer than three are supplied
    /// - [`LoanError::NonAmortizing`] when a term is requested for a payment
    ///   that never covers the interest
    /// - [`LoanError::RootFinding`] when the rate cannot be solved for
    pub fn construct(inputs: LoanInputs) -> LoanResult<Self> {
        Self::construct_with(inputs, &ResolverConfig::default())
    }

    /// Resolves `inputs` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// As [`construct`](Self::construct), plus [`LoanError::InvalidConfig`].
    pub fn construct_with(inputs: LoanInputs, config: &ResolverConfig) -> LoanResult<Self> {
        resolver::resolve(&inputs, config, Vec::new())
    }

    pub(crate) fn from_parts(
        principal: f64,
        annual_rate: f64,
        monthly_payment: f64,
        term_months: u32,
        resolution: Resolution,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            monthly_payment,
            term_months,
            resolution,
            diagnostics,
        }
    }

    /// Amount borrowed.
    #[must_use]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Nominal annual rate.
    #[must_use]
    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// `annual_rate / 12`.
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate)
    }

    /// Fixed monthly payment.
    #[must_use]
    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    /// Number of monthly payments.
    #[must_use]
    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Which field was derived and how.
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Warnings raised during construction.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `monthly_payment * term_months`.
    #[must_use]
    pub fn total_paid(&self) -> f64 {
        self.monthly_payment * f64::from(self.term_months)
    }

    /// `total_paid - principal`.
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        self.total_paid() - self.principal
    }

    /// Interest portion of payment `month` (1-based).
    ///
    /// Computed in closed form as `(P r - payment)(1+r)^(m-1) + payment`.
    /// Months past the term are not rejected; they continue the formula.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidMonth`] for month 0.
    pub fn interest_for_month(&self, month: u32) -> LoanResult<f64> {
        if month == 0 {
            return Err(LoanError::InvalidMonth { month });
        }
        let r = self.monthly_rate();
        let growth = compound_growth(r, f64::from(month - 1)) + 1.0;
        Ok((self.principal * r - self.monthly_payment) * growth + self.monthly_payment)
    }

    /// Principal portion of payment `month` (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidMonth`] for month 0.
    pub fn principal_for_month(&self, month: u32) -> LoanResult<f64> {
        Ok(self.monthly_payment - self.interest_for_month(month)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::LoanField;
    use approx::assert_relative_eq;

    fn car_loan() -> LoanParameters {
        LoanParameters::construct(
            LoanInputs::new()
                .with_principal(10_000.0)
                .with_annual_rate(0.06)
                .with_term_months(60),
        )
        .unwrap()
    }

    #[test]
    fn test_construct_derives_payment() {
        let loan = car_loan();
        assert_relative_eq!(loan.monthly_payment(), 193.328_015_294, epsilon = 1e-6);
        assert_eq!(loan.resolution().derived, Some(LoanField::MonthlyPayment));
        assert!(loan.resolution().rate_solution.is_none());
    }

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoanParameters>();
        assert_send_sync::<LoanInputs>();
        assert_send_sync::<LoanError>();
        assert_send_sync::<ResolverConfig>();
        assert_send_sync::<crate::derived::BreakevenRate>();
        assert_send_sync::<crate::schedule::Schedule<'static>>();
    }

    #[test]
    fn test_first_month_split() {
        let loan = car_loan();
        assert_relative_eq!(loan.interest_for_month(1).unwrap(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(
            loan.principal_for_month(1).unwrap(),
            143.328_015_294,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_month_zero_is_rejected() {
        let loan = car_loan();
        assert_eq!(
            loan.interest_for_month(0).unwrap_err(),
            LoanError::InvalidMonth { month: 0 }
        );
        assert!(loan.principal_for_month(0).is_err());
    }

    #[test]
    fn test_interest_declines_and_principal_grows() {
        let loan = car_loan();
        let mut last_interest = f64::INFINITY;
        for month in 1..=loan.term_months() {
            let interest = loan.interest_for_month(month).unwrap();
            let principal = loan.principal_for_month(month).unwrap();
            assert!(interest < last_interest);
            assert_relative_eq!(interest + principal, loan.monthly_payment(), epsilon = 1e-9);
            last_interest = interest;
        }
    }

    #[test]
    fn test_principal_portions_repay_the_loan() {
        let loan = car_loan();
        let repaid: f64 = (1..=loan.term_months())
            .map(|m| loan.principal_for_month(m).unwrap())
            .sum();
        assert_relative_eq!(repaid, loan.principal(), max_relative = 1e-9);
    }

    #[test]
    fn test_months_past_term_continue_formula() {
        let loan = car_loan();
        // Past the last payment the balance is negative, so "interest" goes negative
        assert!(loan.interest_for_month(61).unwrap() < loan.interest_for_month(60).unwrap());
        assert!(loan.interest_for_month(200).is_ok());
    }

    #[test]
    fn test_totals() {
        let loan = car_loan();
        assert_relative_eq!(loan.total_paid(), loan.monthly_payment() * 60.0);
        assert_relative_eq!(loan.total_interest(), loan.total_paid() - 10_000.0);
        assert!(loan.total_interest() > 0.0);
    }

    #[test]
    fn test_serializes_fields_and_resolution() {
        let loan = car_loan();
        let json = serde_json::to_value(&loan).unwrap();
        assert_eq!(json["principal"], 10_000.0);
        assert_eq!(json["term_months"], 60);
        assert_eq!(json["resolution"]["derived"], "monthly_payment");
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }
}
