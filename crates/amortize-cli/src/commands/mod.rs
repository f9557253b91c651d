//! CLI command implementations.

pub mod breakeven;
pub mod down_payment;
pub mod schedule;
pub mod solve;

// Re-export submodules for convenience
pub use breakeven::BreakevenArgs;
pub use down_payment::DownPaymentArgs;
pub use schedule::ScheduleArgs;
pub use solve::SolveArgs;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use amortize_core::prelude::*;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{
    format_percent, print_csv, print_diagnostics, print_header, print_json, print_table, KeyValue,
};

/// Settings shared by every command.
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    pub config: ResolverConfig,
}

/// The four loan quantities plus free-form fields.
#[derive(Args, Debug, Clone, Default)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, allow_negative_numbers = true)]
    pub principal: Option<f64>,

    /// Nominal annual rate as a fraction (0.045 for 4.5%)
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Fixed monthly payment
    #[arg(long, allow_negative_numbers = true)]
    pub payment: Option<f64>,

    /// Term in months
    #[arg(long, allow_negative_numbers = true)]
    pub term: Option<f64>,

    /// Additional field as NAME=VALUE (repeatable)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

impl LoanArgs {
    /// Collects the flags into validated loan inputs.
    ///
    /// `--field` values are applied after the named flags, so a field naming
    /// a loan quantity overrides its flag.
    pub fn to_inputs(&self) -> Result<LoanInputs> {
        let mut pairs: Vec<(String, f64)> = [
            (LoanField::Principal, self.principal),
            (LoanField::AnnualRate, self.rate),
            (LoanField::MonthlyPayment, self.payment),
            (LoanField::TermMonths, self.term),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field.name().to_string(), v)))
        .collect();

        for field in &self.fields {
            pairs.push(parse_field(field)?);
        }

        Ok(LoanInputs::from_fields(pairs)?)
    }
}

/// Parses a `NAME=VALUE` field argument.
pub fn parse_field(s: &str) -> CliResult<(String, f64)> {
    let invalid = || CliError::InvalidField(s.to_string());
    let (name, value) = s.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;
    Ok((name.to_string(), value))
}

#[derive(Serialize)]
struct LoanReport<'a> {
    #[serde(flatten)]
    loan: &'a LoanParameters,
    total_paid: f64,
    total_interest: f64,
}

/// Key metrics of a resolved loan, in display order.
pub fn loan_rows(loan: &LoanParameters) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::from_amount("Principal", loan.principal()),
        KeyValue::from_percent("Annual Rate", loan.annual_rate()),
        KeyValue::from_amount("Monthly Payment", loan.monthly_payment()),
        KeyValue::new("Term (months)", loan.term_months().to_string()),
        KeyValue::from_amount("Total Paid", loan.total_paid()),
        KeyValue::from_amount("Total Interest", loan.total_interest()),
    ];

    let derived = loan
        .resolution()
        .derived
        .map_or_else(|| "none".to_string(), |field| field.to_string());
    rows.push(KeyValue::new("Derived", derived));

    if let Some(solution) = loan.resolution().rate_solution {
        rows.push(KeyValue::new(
            "Rate Solver",
            format!("{} ({} iterations)", solution.method, solution.iterations),
        ));
    }
    rows
}

/// The derived quantity alone, or the payment when nothing was derived.
fn minimal_value(loan: &LoanParameters) -> String {
    match loan.resolution().derived {
        Some(LoanField::Principal) => loan.principal().to_string(),
        Some(LoanField::AnnualRate) => loan.annual_rate().to_string(),
        Some(LoanField::TermMonths) => loan.term_months().to_string(),
        Some(LoanField::MonthlyPayment) | None => loan.monthly_payment().to_string(),
    }
}

/// Prints a resolved loan in the requested format, then its diagnostics.
pub fn render_loan(loan: &LoanParameters, ctx: &Context, title: &str) -> Result<()> {
    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(title);
            }
            print_table(&loan_rows(loan))?;
        }
        OutputFormat::Json => print_json(&LoanReport {
            loan,
            total_paid: loan.total_paid(),
            total_interest: loan.total_interest(),
        })?,
        OutputFormat::Csv => print_csv(&loan_rows(loan))?,
        OutputFormat::Minimal => println!("{}", minimal_value(loan)),
    }

    print_diagnostics(loan.diagnostics(), ctx.quiet);
    Ok(())
}

/// Formats a rate for the breakeven summary.
pub fn breakeven_percent(rate: f64) -> String {
    format_percent(rate, 3)
}
