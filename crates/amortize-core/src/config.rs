//! Resolver configuration.
//!
//! Controls the interest-rate root finder, the rounding policy for derived
//! terms, the plausibility band for derived rates and the optional
//! consistency check for fully specified loans. Every field has a default,
//! so a partial TOML or JSON document deserializes cleanly.

use serde::{Deserialize, Serialize};

use amortize_math::solvers::SolverConfig;

use crate::error::{LoanError, LoanResult};

// =============================================================================
// RESOLVER CONFIGURATION
// =============================================================================

/// Settings used by [`LoanParameters::construct_with`](crate::loan::LoanParameters::construct_with).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Interest-rate root finder settings.
    #[serde(default)]
    pub rate_solver: RateSolverConfig,

    /// Rounding applied to a derived term.
    #[serde(default)]
    pub term_rounding: TermRounding,

    /// Band outside which a derived rate raises a diagnostic.
    #[serde(default)]
    pub plausible_rate: PlausibleRateRange,

    /// Whether a fully specified loan is checked against the annuity identity.
    #[serde(default)]
    pub check_consistency: bool,

    /// Relative payment difference tolerated by the consistency check.
    #[serde(default = "default_consistency_tolerance")]
    pub consistency_tolerance: f64,
}

fn default_consistency_tolerance() -> f64 {
    1e-6
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rate_solver: RateSolverConfig::default(),
            term_rounding: TermRounding::default(),
            plausible_rate: PlausibleRateRange::default(),
            check_consistency: false,
            consistency_tolerance: default_consistency_tolerance(),
        }
    }
}

impl ResolverConfig {
    /// Sets the rate solver settings.
    #[must_use]
    pub fn with_rate_solver(mut self, rate_solver: RateSolverConfig) -> Self {
        self.rate_solver = rate_solver;
        self
    }

    /// Sets the term rounding policy.
    #[must_use]
    pub fn with_term_rounding(mut self, term_rounding: TermRounding) -> Self {
        self.term_rounding = term_rounding;
        self
    }

    /// Sets the plausible rate band.
    #[must_use]
    pub fn with_plausible_rate(mut self, min: f64, max: f64) -> Self {
        self.plausible_rate = PlausibleRateRange { min, max };
        self
    }

    /// Enables or disables the consistency check for fully specified loans.
    #[must_use]
    pub fn with_consistency_check(mut self, enabled: bool) -> Self {
        self.check_consistency = enabled;
        self
    }

    /// Rejects settings the resolver cannot work with.
    pub fn validate(&self) -> LoanResult<()> {
        self.rate_solver.validate()?;
        self.plausible_rate.validate()?;
        if !(self.consistency_tolerance.is_finite() && self.consistency_tolerance > 0.0) {
            return Err(LoanError::invalid_config(
                "consistency_tolerance",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// RATE SOLVER
// =============================================================================

/// Settings for the Newton-Raphson then bisection rate search.
///
/// All values are in monthly-rate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSolverConfig {
    /// Newton-Raphson seed.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Iteration cap applied to each method separately.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Convergence tolerance on the step (Newton) or half-width (bisection).
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Bisection bracket `[low, high]`.
    #[serde(default = "default_bracket")]
    pub bracket: [f64; 2],
}

fn default_initial_guess() -> f64 {
    0.5
}

fn default_max_iterations() -> u32 {
    100
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_bracket() -> [f64; 2] {
    [0.0, 1.0]
}

impl Default for RateSolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: default_initial_guess(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            bracket: default_bracket(),
        }
    }
}

impl RateSolverConfig {
    /// Sets the Newton-Raphson seed.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bisection bracket.
    #[must_use]
    pub fn with_bracket(mut self, low: f64, high: f64) -> Self {
        self.bracket = [low, high];
        self
    }

    /// Returns the generic solver settings.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    /// Returns the bracket as a tuple.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.bracket[0], self.bracket[1])
    }

    fn validate(&self) -> LoanResult<()> {
        if !self.initial_guess.is_finite() {
            return Err(LoanError::invalid_config(
                "rate_solver.initial_guess",
                "must be finite",
            ));
        }
        if self.max_iterations == 0 {
            return Err(LoanError::invalid_config(
                "rate_solver.max_iterations",
                "must be at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(LoanError::invalid_config(
                "rate_solver.tolerance",
                "must be a positive number",
            ));
        }
        let [low, high] = self.bracket;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(LoanError::invalid_config(
                "rate_solver.bracket",
                format!("[{low}, {high}] is not a finite increasing interval"),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TERM ROUNDING
// =============================================================================

/// Rounding applied to a term derived from principal, payment and rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermRounding {
    /// Discard the fractional month (may understate the term by one month).
    #[default]
    Truncate,
    /// Round to the nearest whole month.
    Nearest,
    /// Round any fractional month up.
    Up,
}

impl TermRounding {
    /// Applies the policy to a fractional month count.
    #[must_use]
    pub fn apply(self, months: f64) -> f64 {
        match self {
            Self::Truncate => months.trunc(),
            Self::Nearest => months.round(),
            Self::Up => months.ceil(),
        }
    }
}

// =============================================================================
// PLAUSIBLE RATE BAND
// =============================================================================

/// Annual rates inside `[min, max]` are considered plausible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibleRateRange {
    /// Lower bound (default 0.5%).
    #[serde(default = "default_min_rate")]
    pub min: f64,
    /// Upper bound (default 10%).
    #[serde(default = "default_max_rate")]
    pub max: f64,
}

fn default_min_rate() -> f64 {
    0.005
}

fn default_max_rate() -> f64 {
    0.10
}

impl Default for PlausibleRateRange {
    fn default() -> Self {
        Self {
            min: default_min_rate(),
            max: default_max_rate(),
        }
    }
}

impl PlausibleRateRange {
    fn validate(&self) -> LoanResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min <= self.max) {
            return Err(LoanError::invalid_config(
                "plausible_rate",
                format!("min {} must not exceed max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}
