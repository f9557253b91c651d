//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--field` argument is not `NAME=VALUE`.
    #[error("Invalid field `{0}`: expected NAME=VALUE with a numeric value")]
    InvalidField(String),

    /// The settings file could not be parsed.
    #[error("Configuration error in {}: {reason}", path.display())]
    Config {
        /// The settings file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
