//! # Amortize Math
//!
//! Numerical building blocks for the Amortize loan library.
//!
//! This crate provides:
//!
//! - **Polynomials**: Dense polynomials with Horner evaluation, analytic
//!   derivatives and binomial coefficient rows
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Bisection) and a
//!   composable fallback chain
//!
//! ## Design Philosophy
//!
//! - **Bounded**: Every iteration is capped; no solver can spin forever
//! - **Composable**: Solvers share one capability trait and can be chained
//! - **Explicit Failure**: Non-convergence is an error, never a silent guess

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
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod polynomial;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::polynomial::{binomial_row, Polynomial};
    pub use crate::solvers::{
        bisection, newton_raphson, BisectionSolver, Fallback, NewtonSolver, Solver,
        SolverConfig, SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
