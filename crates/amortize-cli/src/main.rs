//! Amortize CLI - Command-line interface for fixed-rate loan calculations.
//!
//! # Usage
//!
//! ```bash
//! # Monthly payment for a 30-year mortgage
//! amortize solve --principal 240000 --rate 0.04 --term 360
//!
//! # Rate implied by a payment
//! amortize solve --principal 10000 --payment 193.33 --term 60
//!
//! # Schedule with calendar labels
//! amortize schedule --principal 10000 --rate 0.06 --term 60 --start-year 2025 --start-month 3
//!
//! # Rate at which total interest reaches a cap
//! amortize breakeven --principal 200000 --term 360 --interest-cap 150000
//!
//! # Loan from a purchase price and down payment
//! amortize down-payment --total 300000 --down-payment 60000 --rate 0.04 --term 360
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = settings::load(cli.config.as_deref())?;
    debug!(?config, "resolver configuration");

    let ctx = commands::Context {
        format: cli.format,
        quiet: cli.quiet,
        config,
    };

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, &ctx)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Breakeven(args) => commands::breakeven::execute(args, &ctx)?,
        Commands::DownPayment(args) => commands::down_payment::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON and CSV output on stdout stay clean.
///
/// Diagnostics are printed by the commands themselves, so library warnings
/// are only logged when `--verbose` or `RUST_LOG` asks for them.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("amortize=debug,amortize_core=debug,amortize_math=debug")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
