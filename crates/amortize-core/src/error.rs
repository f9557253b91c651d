//! Error types for loan resolution and amortization.
//!
//! Every fatal failure aborts the current operation; no partially
//! constructed loan is ever returned. Non-fatal conditions are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.

use thiserror::Error;

use amortize_math::MathError;

/// A specialized Result type for loan operations.
pub type LoanResult<T> = Result<T, LoanError>;

/// The main error type for loan operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// A supplied value failed type or range validation.
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The supplied fields do not match any resolution case.
    #[error(
        "Not enough parameters: expected all or three of `principal`, `annual_rate`, \
         `monthly_payment`, `term_months` (got: {supplied})"
    )]
    InsufficientParameters {
        /// Comma-separated names of the recognised fields that were supplied.
        supplied: String,
    },

    /// The monthly payment never covers the interest, so the loan never amortizes.
    #[error(
        "Payment {monthly_payment} does not cover the first month's interest {first_interest}; \
         the loan never amortizes"
    )]
    NonAmortizing {
        /// The supplied monthly payment.
        monthly_payment: f64,
        /// Interest accrued in the first month.
        first_interest: f64,
    },

    /// Both Newton-Raphson and bisection failed for the interest-rate case.
    #[error("Interest rate root finder did not converge: {reason}")]
    RootFinding {
        /// Description of the final failure.
        reason: String,
    },

    /// A per-period query was given a month outside `1..`.
    #[error("Invalid month {month}: must be an integer greater than 0")]
    InvalidMonth {
        /// The rejected month.
        month: u32,
    },

    /// Malformed schedule start year/month.
    #[error("Invalid calendar input: {reason}")]
    InvalidCalendarInput {
        /// Description of the problem.
        reason: String,
    },

    /// Resolver configuration is unusable.
    #[error("Invalid configuration `{field}`: {reason}")]
    InvalidConfig {
        /// The configuration field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl LoanError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid calendar input error.
    #[must_use]
    pub fn invalid_calendar(reason: impl Into<String>) -> Self {
        Self::InvalidCalendarInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<MathError> for LoanError {
    fn from(err: MathError) -> Self {
        Self::RootFinding {
            reason: err.to_string(),
        }
    }
}
