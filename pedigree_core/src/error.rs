//! Error types for the pedigree simulator.

use thiserror::Error;

/// Errors that can stop a simulation run.
///
/// Ordinary biological outcomes (a mother with no available partner, a
/// stale event, a death for someone already gone) are never errors; they
/// are counted in [`SimulationStats`](crate::SimulationStats) instead.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// A run parameter (population size, horizon) is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration field is out of its valid range
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The age model produced a value that would corrupt event ordering
    #[error("Age model returned an invalid {what}: {value}")]
    InvalidVariate { what: &'static str, value: f64 },
}

impl SimError {
    /// Creates an invalid argument error.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an invalid configuration error.
    pub fn config(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfig { field, value, reason }
    }
}

/// Result alias used throughout the core crate.
pub type SimResult<T> = Result<T, SimError>;
