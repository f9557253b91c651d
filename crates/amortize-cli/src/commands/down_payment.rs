//! Down-payment command implementation.
//!
//! Borrows `total - down_payment` and resolves the rest of the loan.

use anyhow::Result;
use clap::Args;

use amortize_core::LoanParameters;

use crate::commands::{render_loan, Context, LoanArgs};

/// Arguments for the down-payment command.
#[derive(Args, Debug)]
pub struct DownPaymentArgs {
    /// Purchase price
    #[arg(long, allow_negative_numbers = true)]
    pub total: f64,

    /// Amount paid up front
    #[arg(long, allow_negative_numbers = true)]
    pub down_payment: f64,

    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Execute the down-payment command.
pub fn execute(args: DownPaymentArgs, ctx: &Context) -> Result<()> {
    let inputs = args.loan.to_inputs()?;
    let loan = LoanParameters::from_total_and_down_payment_with(
        args.total,
        args.down_payment,
        inputs,
        &ctx.config,
    )?;
    render_loan(&loan, ctx, "Loan After Down Payment")
}
