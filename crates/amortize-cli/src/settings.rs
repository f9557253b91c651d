//! Resolver settings file.
//!
//! The file holds a [`ResolverConfig`] in TOML; any key it omits keeps its
//! default:
//!
//! ```toml
//! term_rounding = "nearest"
//! check_consistency = true
//!
//! [rate_solver]
//! initial_guess = 0.01
//! max_iterations = 200
//!
//! [plausible_rate]
//! max = 0.15
//! ```

use std::path::Path;

use amortize_core::ResolverConfig;
use tracing::info;

use crate::error::{CliError, CliResult};

/// Loads settings from `path`, or the defaults when no file is given.
pub fn load(path: Option<&Path>) -> CliResult<ResolverConfig> {
    match path {
        Some(path) => from_file(path),
        None => Ok(ResolverConfig::default()),
    }
}

/// Loads settings from a TOML file.
pub fn from_file(path: &Path) -> CliResult<ResolverConfig> {
    info!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: ResolverConfig = toml::from_str(&content).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    config.validate().map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(config)
}
