//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BreakevenArgs, DownPaymentArgs, ScheduleArgs, SolveArgs};

/// Amortize - Fixed-rate loan calculator
#[derive(Parser)]
#[command(name = "amortize")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Resolver settings file (TOML)
    #[arg(short, long, global = true, env = "AMORTIZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress warnings and headers
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Derive the missing loan quantity from the other three
    Solve(SolveArgs),

    /// Print the month-by-month amortization schedule
    Schedule(ScheduleArgs),

    /// Find the rate at which total interest equals a cap
    Breakeven(BreakevenArgs),

    /// Resolve a loan from a purchase price and down payment
    DownPayment(DownPaymentArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
