//! Schedule command implementation.
//!
//! Prints one row per month: payment split, balance, cumulative interest
//! and percentage owned.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use amortize_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::{Context, LoanArgs};
use crate::output::{
    format_amount, format_percent, print_csv, print_diagnostics, print_header, print_json,
    print_table,
};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Calendar year of the first payment (requires --start-month)
    #[arg(long, allow_negative_numbers = true)]
    pub start_year: Option<i32>,

    /// Calendar month of the first payment, 1-12 (requires --start-year)
    #[arg(long)]
    pub start_month: Option<u32>,
}

/// A schedule row formatted for display.
#[derive(Debug, Tabled)]
struct ScheduleLine {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Cum. Interest")]
    cumulative_interest: String,
    #[tabled(rename = "Owned")]
    ownership: String,
}

impl From<&ScheduleRow> for ScheduleLine {
    fn from(row: &ScheduleRow) -> Self {
        Self {
            period: row.period.to_string(),
            payment: format_amount(row.payment),
            principal: format_amount(row.principal),
            interest: format_amount(row.interest),
            balance: format_amount(row.balance),
            cumulative_interest: format_amount(row.cumulative_interest),
            ownership: format_percent(row.ownership_pct / 100.0, 2),
        }
    }
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let inputs = args.loan.to_inputs()?;
    let loan = LoanParameters::construct_with(inputs, &ctx.config)?;
    let rows: Vec<ScheduleRow> = loan.schedule(args.start_year, args.start_month)?.collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!(
                    "Amortization Schedule: {} at {} for {} months",
                    format_amount(loan.principal()),
                    format_percent(loan.annual_rate(), 4),
                    loan.term_months()
                ));
            }
            let lines: Vec<ScheduleLine> = rows.iter().map(ScheduleLine::from).collect();
            print_table(&lines)?;
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Minimal => println!("{}", loan.total_interest()),
    }

    print_diagnostics(loan.diagnostics(), ctx.quiet);
    Ok(())
}
