//! Error types for the command-line runner.

use pedigree_core::SimError;
use thiserror::Error;

/// Errors surfaced by `pedigree-sim`. Every variant exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Simulation refused its arguments or hit a fatal variate
    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    /// Writing the table or export failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Export serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
