//! Loan parameter resolution.
//!
//! The set of supplied fields is classified once into a [`ResolutionCase`]
//! that carries exactly the values its solver needs, then dispatched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annuity::{payment_from_principal, principal_from_payment, term_from_principal};
use crate::config::ResolverConfig;
use crate::diagnostics::{Diagnostic, RateAssessment};
use crate::error::{LoanError, LoanResult};
use crate::loan::LoanParameters;
use crate::rate::{solve_annual_rate, RateSolution};
use crate::validation::{LoanField, LoanInputs};

/// Which quantity is derived, with the three (or four) supplied values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionCase {
    /// All four supplied; accepted as-is.
    Passthrough {
        /// Amount borrowed.
        principal: f64,
        /// Nominal annual rate.
        annual_rate: f64,
        /// Fixed monthly payment.
        monthly_payment: f64,
        /// Number of payments.
        term_months: u32,
    },
    /// Monthly payment is derived.
    Payment {
        /// Amount borrowed.
        principal: f64,
        /// Nominal annual rate.
        annual_rate: f64,
        /// Number of payments.
        term_months: u32,
    },
    /// Principal is derived.
    Principal {
        /// Fixed monthly payment.
        monthly_payment: f64,
        /// Nominal annual rate.
        annual_rate: f64,
        /// Number of payments.
        term_months: u32,
    },
    /// Term is derived.
    Term {
        /// Amount borrowed.
        principal: f64,
        /// Fixed monthly payment.
        monthly_payment: f64,
        /// Nominal annual rate.
        annual_rate: f64,
    },
    /// Annual rate is derived numerically.
    Rate {
        /// Amount borrowed.
        principal: f64,
        /// Fixed monthly payment.
        monthly_payment: f64,
        /// Number of payments.
        term_months: u32,
    },
}

impl ResolutionCase {
    /// Classifies the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InsufficientParameters`] when fewer than three of
    /// the four quantities are present.
    pub fn classify(inputs: &LoanInputs) -> LoanResult<Self> {
        let case = match (
            inputs.principal,
            inputs.annual_rate,
            inputs.monthly_payment,
            inputs.term_months,
        ) {
            (Some(principal), Some(annual_rate), Some(monthly_payment), Some(term_months)) => {
                Self::Passthrough {
                    principal,
                    annual_rate,
                    monthly_payment,
                    term_months,
                }
            }
            (Some(principal), Some(annual_rate), None, Some(term_months)) => Self::Payment {
                principal,
                annual_rate,
                term_months,
            },
            (None, Some(annual_rate), Some(monthly_payment), Some(term_months)) => {
                Self::Principal {
                    monthly_payment,
                    annual_rate,
                    term_months,
                }
            }
            (Some(principal), Some(annual_rate), Some(monthly_payment), None) => Self::Term {
                principal,
                monthly_payment,
                annual_rate,
            },
            (Some(principal), None, Some(monthly_payment), Some(term_months)) => Self::Rate {
                principal,
                monthly_payment,
                term_months,
            },
            _ => {
                let present: Vec<&str> = inputs.present().into_iter().map(LoanField::name).collect();
                let supplied = if present.is_empty() {
                    "none".to_string()
                } else {
                    present.join(", ")
                };
                return Err(LoanError::InsufficientParameters { supplied });
            }
        };
        Ok(case)
    }

    /// The field this case derives, or `None` for a passthrough.
    #[must_use]
    pub fn derived_field(&self) -> Option<LoanField> {
        match self {
            Self::Passthrough { .. } => None,
            Self::Payment { .. } => Some(LoanField::MonthlyPayment),
            Self::Principal { .. } => Some(LoanField::Principal),
            Self::Term { .. } => Some(LoanField::TermMonths),
            Self::Rate { .. } => Some(LoanField::AnnualRate),
        }
    }
}

/// How a [`LoanParameters`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// The derived field, or `None` when all four were supplied.
    pub derived: Option<LoanField>,
    /// Root-finder outcome when the rate was derived.
    pub rate_solution: Option<RateSolution>,
}

/// Validates, classifies and resolves `inputs`.
///
/// `diagnostics` holds anything already raised by a caller (for example a
/// derived constructor) and is extended in place.
pub(crate) fn resolve(
    inputs: &LoanInputs,
    config: &ResolverConfig,
    mut diagnostics: Vec<Diagnostic>,
) -> LoanResult<LoanParameters> {
    config.validate()?;
    inputs.validate()?;

    for name in &inputs.unrecognized {
        Diagnostic::UnrecognizedField { name: name.clone() }.raise(&mut diagnostics);
    }

    let case = ResolutionCase::classify(inputs)?;
    debug!(?case, "resolving loan parameters");

    let mut rate_solution = None;
    let (principal, annual_rate, monthly_payment, term_months) = match case {
        ResolutionCase::Passthrough {
            principal,
            annual_rate,
            monthly_payment,
            term_months,
        } => {
            if config.check_consistency {
                check_consistency(
                    principal,
                    annual_rate,
                    monthly_payment,
                    term_months,
                    config,
                    &mut diagnostics,
                );
            }
            (principal, annual_rate, monthly_payment, term_months)
        }
        ResolutionCase::Payment {
            principal,
            annual_rate,
            term_months,
        } => {
            let monthly_payment = derived_amount(
                LoanField::MonthlyPayment,
                payment_from_principal(principal, annual_rate, term_months),
            )?;
            (principal, annual_rate, monthly_payment, term_months)
        }
        ResolutionCase::Principal {
            monthly_payment,
            annual_rate,
            term_months,
        } => {
            let principal = derived_amount(
                LoanField::Principal,
                principal_from_payment(monthly_payment, annual_rate, term_months),
            )?;
            (principal, annual_rate, monthly_payment, term_months)
        }
        ResolutionCase::Term {
            principal,
            monthly_payment,
            annual_rate,
        } => {
            let term_months =
                term_from_principal(principal, monthly_payment, annual_rate, config.term_rounding)?;
            (principal, annual_rate, monthly_payment, term_months)
        }
        ResolutionCase::Rate {
            principal,
            monthly_payment,
            term_months,
        } => {
            let solution =
                solve_annual_rate(principal, monthly_payment, term_months, &config.rate_solver)?;
            if let Some((assessment, threshold)) =
                RateAssessment::classify(solution.annual_rate, &config.plausible_rate)
            {
                Diagnostic::ImplausibleRate {
                    annual_rate: solution.annual_rate,
                    assessment,
                    threshold,
                }
                .raise(&mut diagnostics);
            }
            rate_solution = Some(solution);
            (principal, solution.annual_rate, monthly_payment, term_months)
        }
    };

    Ok(LoanParameters::from_parts(
        principal,
        annual_rate,
        monthly_payment,
        term_months,
        Resolution {
            derived: case.derived_field(),
            rate_solution,
        },
        diagnostics,
    ))
}

/// Rejects a closed-form result that overflowed or underflowed.
fn derived_amount(field: LoanField, value: f64) -> LoanResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LoanError::invalid_parameter(
            field.name(),
            format!("derived value {value} is not a finite amount above zero"),
        ))
    }
}

fn check_consistency(
    principal: f64,
    annual_rate: f64,
    monthly_payment: f64,
    term_months: u32,
    config: &ResolverConfig,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let implied_payment = payment_from_principal(principal, annual_rate, term_months);
    if (monthly_payment - implied_payment).abs() > config.consistency_tolerance * implied_payment {
        Diagnostic::InconsistentParameters {
            supplied_payment: monthly_payment,
            implied_payment,
        }
        .raise(diagnostics);
    }
}
