//! Solve command implementation.
//!
//! Derives whichever loan quantity is missing from the other three.

use anyhow::Result;
use clap::Args;

use amortize_core::LoanParameters;

use crate::commands::{render_loan, Context, LoanArgs};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, ctx: &Context) -> Result<()> {
    let inputs = args.loan.to_inputs()?;
    let loan = LoanParameters::construct_with(inputs, &ctx.config)?;
    render_loan(&loan, ctx, "Loan Parameters")
}
