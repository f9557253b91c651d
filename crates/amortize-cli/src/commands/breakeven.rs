//! Breakeven command implementation.
//!
//! Finds the annual rate at which total interest over the term equals a cap.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use amortize_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::{breakeven_percent, Context};
use crate::output::{
    print_csv, print_diagnostics, print_header, print_json, print_table, KeyValue,
};

/// Arguments for the breakeven command.
#[derive(Args, Debug)]
pub struct BreakevenArgs {
    /// Amount borrowed
    #[arg(long, allow_negative_numbers = true)]
    pub principal: f64,

    /// Term in months
    #[arg(long)]
    pub term: u32,

    /// Maximum total interest over the term
    #[arg(long, allow_negative_numbers = true)]
    pub interest_cap: f64,
}

#[derive(Serialize)]
struct BreakevenReport<'a> {
    #[serde(flatten)]
    breakeven: &'a BreakevenRate,
    annual_rate: f64,
    summary: String,
}

fn breakeven_rows(breakeven: &BreakevenRate) -> Vec<KeyValue> {
    let loan = breakeven.loan();
    vec![
        KeyValue::from_amount("Principal", loan.principal()),
        KeyValue::from_amount("Interest Cap", breakeven.interest_cap()),
        KeyValue::from_amount("Total Repaid", loan.total_paid()),
        KeyValue::new("Term (months)", loan.term_months().to_string()),
        KeyValue::from_amount("Monthly Payment", loan.monthly_payment()),
        KeyValue::new("Breakeven Rate", breakeven_percent(breakeven.annual_rate())),
    ]
}

/// Execute the breakeven command.
pub fn execute(args: BreakevenArgs, ctx: &Context) -> Result<()> {
    let breakeven = LoanParameters::resolve_breakeven_rate_with(
        args.principal,
        args.term,
        args.interest_cap,
        &ctx.config,
    )?;

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Breakeven Rate");
            }
            print_table(&breakeven_rows(&breakeven))?;
            if !ctx.quiet {
                println!("{}", breakeven.summary());
            }
        }
        OutputFormat::Json => print_json(&BreakevenReport {
            breakeven: &breakeven,
            annual_rate: breakeven.annual_rate(),
            summary: breakeven.summary(),
        })?,
        OutputFormat::Csv => print_csv(&breakeven_rows(&breakeven))?,
        OutputFormat::Minimal => println!("{}", breakeven.annual_rate()),
    }

    print_diagnostics(breakeven.loan().diagnostics(), ctx.quiet);
    Ok(())
}
