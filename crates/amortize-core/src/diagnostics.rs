//! Non-fatal diagnostics raised while constructing a loan.
//!
//! Diagnostics never abort construction. Each one is logged at `warn` level
//! when it is raised and kept on the resulting
//! [`LoanParameters`](crate::loan::LoanParameters) for callers that want to
//! surface them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::PlausibleRateRange;

/// A warning attached to a constructed loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A field outside the four loan quantities was supplied and ignored.
    UnrecognizedField {
        /// The unrecognised field name.
        name: String,
    },

    /// The derived annual rate falls outside the plausible range.
    ImplausibleRate {
        /// The derived annual rate.
        annual_rate: f64,
        /// Which side of the range it fell on.
        assessment: RateAssessment,
        /// The bound that was crossed (0 for negative rates).
        threshold: f64,
    },

    /// A supplied principal was replaced by `total_price - down_payment`.
    PrincipalOverwritten {
        /// The principal the caller supplied.
        supplied: f64,
        /// The principal that replaced it.
        derived: f64,
    },

    /// All four quantities were supplied but do not satisfy the annuity identity.
    InconsistentParameters {
        /// The supplied monthly payment.
        supplied_payment: f64,
        /// The payment implied by principal, rate and term.
        implied_payment: f64,
    },
}

/// Classification of a derived rate that is outside the plausible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateAssessment {
    /// Below zero: payments total less than the principal.
    Negative,
    /// Above the upper bound.
    High,
    /// Non-negative but below the lower bound.
    Low,
}

impl RateAssessment {
    /// Classifies `annual_rate` against `range`.
    ///
    /// Checks are ordered negative, high, low; at most one applies.
    #[must_use]
    pub fn classify(annual_rate: f64, range: &PlausibleRateRange) -> Option<(Self, f64)> {
        if annual_rate < 0.0 {
            Some((Self::Negative, 0.0))
        } else if annual_rate > range.max {
            Some((Self::High, range.max))
        } else if annual_rate < range.min {
            Some((Self::Low, range.min))
        } else {
            None
        }
    }
}

impl Diagnostic {
    /// Logs the diagnostic and appends it to `sink`.
    pub(crate) fn raise(self, sink: &mut Vec<Diagnostic>) {
        warn!(diagnostic = ?self, "{}", self);
        sink.push(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedField { name } => {
                write!(f, "Unused parameter `{name}` was ignored")
            }
            Self::ImplausibleRate {
                annual_rate,
                assessment,
                threshold,
            } => match assessment {
                RateAssessment::Negative => write!(
                    f,
                    "Negative interest rate {:.4}%: total payments are less than the principal",
                    annual_rate * 100.0
                ),
                RateAssessment::High => write!(
                    f,
                    "Interest rate {:.4}% is unusually high (> {:.2}%): total payments far exceed the principal",
                    annual_rate * 100.0,
                    threshold * 100.0
                ),
                RateAssessment::Low => write!(
                    f,
                    "Interest rate {:.4}% is unusually small (< {:.2}%)",
                    annual_rate * 100.0,
                    threshold * 100.0
                ),
            },
            Self::PrincipalOverwritten { supplied, derived } => write!(
                f,
                "Supplied principal {supplied} was overwritten with total minus down payment ({derived})"
            ),
            Self::InconsistentParameters {
                supplied_payment,
                implied_payment,
            } => write!(
                f,
                "Supplied monthly payment {supplied_payment} differs from the payment implied by \
                 principal, rate and term ({implied_payment:.6})"
            ),
        }
    }
}
