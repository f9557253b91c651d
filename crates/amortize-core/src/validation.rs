//! Loan input fields and their validation.
//!
//! Each of the four loan quantities is checked on its own, independently of
//! which resolution case ends up applying.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};

/// One of the four quantities that describe a fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    /// Amount borrowed.
    Principal,
    /// Nominal annual rate, compounded monthly.
    AnnualRate,
    /// Fixed payment due each month.
    MonthlyPayment,
    /// Number of monthly payments.
    TermMonths,
}

impl LoanField {
    /// All fields in canonical order.
    pub const ALL: [LoanField; 4] = [
        LoanField::Principal,
        LoanField::AnnualRate,
        LoanField::MonthlyPayment,
        LoanField::TermMonths,
    ];

    /// Returns the field's external name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::AnnualRate => "annual_rate",
            Self::MonthlyPayment => "monthly_payment",
            Self::TermMonths => "term_months",
        }
    }

    /// Looks a field up by its external name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validates a single supplied value for `field`.
///
/// # Errors
///
/// Returns [`LoanError::InvalidParameter`] when:
/// - `principal` or `monthly_payment` is not finite or is not above zero;
/// - `annual_rate` is not finite or is not strictly between 0 and 1;
/// - `term_months` is not a whole number, is below one, or does not fit a month count.
pub fn validate(field: LoanField, value: f64) -> LoanResult<()> {
    let valid = match field {
        LoanField::Principal | LoanField::MonthlyPayment => value.is_finite() && value > 0.0,
        LoanField::AnnualRate => value.is_finite() && value > 0.0 && value < 1.0,
        LoanField::TermMonths => {
            value.is_finite()
                && value.fract() == 0.0
                && value >= 1.0
                && value <= f64::from(u32::MAX)
        }
    };

    if valid {
        Ok(())
    } else {
        Err(LoanError::invalid_parameter(field.name(), requirement(field)))
    }
}

fn requirement(field: LoanField) -> &'static str {
    match field {
        LoanField::Principal | LoanField::MonthlyPayment => "must be a finite number above zero",
        LoanField::AnnualRate => "must be a real number between 0 and 1 (exclusive)",
        LoanField::TermMonths => "must be a whole number of months, at least one",
    }
}

/// The fields supplied for a loan: any subset of the four quantities plus
/// the names of any unrecognised fields.
///
/// # Example
///
/// ```rust
/// use amortize_core::validation::LoanInputs;
///
/// let inputs = LoanInputs::from_fields([
///     ("principal", 240_000.0),
///     ("annual_rate", 0.04),
///     ("term_months", 360.0),
///     ("balloon", 1.0),
/// ])
/// .unwrap();
///
/// assert_eq!(inputs.term_months, Some(360));
/// assert_eq!(inputs.unrecognized, vec!["balloon".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Amount borrowed.
    #[serde(default)]
    pub principal: Option<f64>,
    /// Nominal annual rate.
    #[serde(default)]
    pub annual_rate: Option<f64>,
    /// Fixed monthly payment.
    #[serde(default)]
    pub monthly_payment: Option<f64>,
    /// Number of monthly payments.
    #[serde(default)]
    pub term_months: Option<u32>,
    /// Names of supplied fields that are not loan quantities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<String>,
}

impl LoanInputs {
    /// Creates an empty set of inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the principal.
    #[must_use]
    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the annual rate.
    #[must_use]
    pub fn with_annual_rate(mut self, annual_rate: f64) -> Self {
        self.annual_rate = Some(annual_rate);
        self
    }

    /// Sets the monthly payment.
    #[must_use]
    pub fn with_monthly_payment(mut self, monthly_payment: f64) -> Self {
        self.monthly_payment = Some(monthly_payment);
        self
    }

    /// Sets the term.
    #[must_use]
    pub fn with_term_months(mut self, term_months: u32) -> Self {
        self.term_months = Some(term_months);
        self
    }

    /// Records an unrecognised field name.
    #[must_use]
    pub fn with_unrecognized(mut self, name: impl Into<String>) -> Self {
        self.unrecognized.push(name.into());
        self
    }

    /// Builds inputs from `(name, value)` pairs.
    ///
    /// Recognised fields are validated as they are read; unknown names are
    /// kept in [`unrecognized`](Self::unrecognized) and reported as
    /// diagnostics during resolution. A repeated name keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidParameter`] for the first value that
    /// fails [`validate`].
    pub fn from_fields<I, K>(fields: I) -> LoanResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut inputs = Self::new();
        for (name, value) in fields {
            let name = name.as_ref();
            match LoanField::from_name(name) {
                Some(field) => {
                    validate(field, value)?;
                    inputs.set(field, value);
                }
                None => inputs.unrecognized.push(name.to_string()),
            }
        }
        Ok(inputs)
    }

    /// Returns the supplied value of `field`, if any.
    #[must_use]
    pub fn get(&self, field: LoanField) -> Option<f64> {
        match field {
            LoanField::Principal => self.principal,
            LoanField::AnnualRate => self.annual_rate,
            LoanField::MonthlyPayment => self.monthly_payment,
            LoanField::TermMonths => self.term_months.map(f64::from),
        }
    }

    /// Returns the recognised fields that were supplied, in canonical order.
    #[must_use]
    pub fn present(&self) -> Vec<LoanField> {
        LoanField::ALL
            .into_iter()
            .filter(|&field| self.get(field).is_some())
            .collect()
    }

    /// Validates every supplied field.
    pub fn validate(&self) -> LoanResult<()> {
        for field in LoanField::ALL {
            if let Some(value) = self.get(field) {
                validate(field, value)?;
            }
        }
        Ok(())
    }

    // Callers validate `value` first; `TermMonths` values are whole and in range.
    fn set(&mut self, field: LoanField, value: f64) {
        match field {
            LoanField::Principal => self.principal = Some(value),
            LoanField::AnnualRate => self.annual_rate = Some(value),
            LoanField::MonthlyPayment => self.monthly_payment = Some(value),
            LoanField::TermMonths => self.term_months = Some(value as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(field: LoanField, value: f64) -> bool {
        matches!(
            validate(field, value),
            Err(LoanError::InvalidParameter { field: ref name, .. }) if name == field.name()
        )
    }

    #[test]
    fn test_principal_and_payment_must_be_positive() {
        for field in [LoanField::Principal, LoanField::MonthlyPayment] {
            assert!(validate(field, 0.01).is_ok());
            assert!(rejected(field, 0.0));
            assert!(rejected(field, -5.0));
            assert!(rejected(field, f64::NAN));
            assert!(rejected(field, f64::INFINITY));
        }
    }

    #[test]
    fn test_rate_bounds_are_exclusive() {
        assert!(validate(LoanField::AnnualRate, 0.045).is_ok());
        assert!(rejected(LoanField::AnnualRate, 0.0));
        assert!(rejected(LoanField::AnnualRate, 1.0));
        assert!(rejected(LoanField::AnnualRate, -0.01));
        assert!(rejected(LoanField::AnnualRate, f64::NAN));
    }

    #[test]
    fn test_term_must_be_whole_and_positive() {
        assert!(validate(LoanField::TermMonths, 1.0).is_ok());
        assert!(validate(LoanField::TermMonths, 360.0).is_ok());
        assert!(rejected(LoanField::TermMonths, 0.0));
        assert!(rejected(LoanField::TermMonths, 12.5));
        assert!(rejected(LoanField::TermMonths, -12.0));
        assert!(rejected(LoanField::TermMonths, 1e12));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in LoanField::ALL {
            assert_eq!(LoanField::from_name(field.name()), Some(field));
        }
        assert_eq!(LoanField::from_name("loan_size"), None);
    }

    #[test]
    fn test_from_fields_collects_unrecognized() {
        let inputs =
            LoanInputs::from_fields([("principal", 1000.0), ("extra", 1.0), ("term_months", 12.0)])
                .unwrap();

        assert_eq!(inputs.principal, Some(1000.0));
        assert_eq!(inputs.term_months, Some(12));
        assert_eq!(inputs.unrecognized, vec!["extra".to_string()]);
        assert_eq!(
            inputs.present(),
            vec![LoanField::Principal, LoanField::TermMonths]
        );
    }

    #[test]
    fn test_from_fields_rejects_fractional_term() {
        let err = LoanInputs::from_fields([("term_months", 59.5)]).unwrap_err();
        assert!(matches!(err, LoanError::InvalidParameter { ref field, .. } if field == "term_months"));
    }

    #[test]
    fn test_validate_checks_builder_values() {
        let inputs = LoanInputs::new().with_principal(1000.0).with_term_months(0);
        assert!(matches!(
            inputs.validate(),
            Err(LoanError::InvalidParameter { ref field, .. }) if field == "term_months"
        ));
    }
}
