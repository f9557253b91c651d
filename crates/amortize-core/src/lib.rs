//! # Amortize Core
//!
//! Fixed-rate loan mechanics: given any three of principal, annual rate,
//! monthly payment and term, derive the fourth and produce the
//! month-by-month amortization schedule.
//!
//! This crate provides:
//!
//! - **Validation**: Per-field range checks on the four loan quantities
//! - **Resolution**: Classification of the supplied fields and dispatch to a
//!   closed-form annuity formula or the numerical rate finder
//! - **Amortization**: Closed-form interest/principal split per month and a
//!   lazy schedule with running balance and ownership percentage
//! - **Derived Constructors**: Breakeven rate for an interest cap, and
//!   principal from a total price and down payment
//!
//! ## Design Philosophy
//!
//! - **Immutable Results**: A [`LoanParameters`] is fully resolved or not built at all
//! - **Warnings Are Data**: Non-fatal conditions are logged and kept on the loan
//! - **Deterministic Numerics**: Newton-Raphson with a bounded bisection fallback
//!
//! ## Example
//!
//! ```rust
//! use amortize_core::prelude::*;
//!
//! let loan = LoanParameters::construct(
//!     LoanInputs::new()
//!         .with_principal(10_000.0)
//!         .with_monthly_payment(193.33)
//!         .with_term_months(60),
//! )
//! .unwrap();
//!
//! assert!((loan.annual_rate() - 0.06).abs() < 1e-4);
//! assert_eq!(loan.resolution().derived, Some(LoanField::AnnualRate));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod annuity;
pub mod config;
pub mod derived;
pub mod diagnostics;
pub mod error;
pub mod loan;
pub mod rate;
pub mod resolver;
pub mod schedule;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{PlausibleRateRange, RateSolverConfig, ResolverConfig, TermRounding};
    pub use crate::derived::BreakevenRate;
    pub use crate::diagnostics::{Diagnostic, RateAssessment};
    pub use crate::error::{LoanError, LoanResult};
    pub use crate::loan::LoanParameters;
    pub use crate::rate::RateSolution;
    pub use crate::resolver::{Resolution, ResolutionCase};
    pub use crate::schedule::{PeriodLabel, Schedule, ScheduleRow};
    pub use crate::validation::{LoanField, LoanInputs};
    pub use amortize_math::solvers::SolverMethod;
}

// Re-export commonly used types at crate root
pub use config::ResolverConfig;
pub use diagnostics::Diagnostic;
pub use error::{LoanError, LoanResult};
pub use loan::LoanParameters;
pub use validation::LoanInputs;
