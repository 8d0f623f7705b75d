//! Pedigree simulator runner
//!
//! Wires the core engine to the outside world: argument parsing, the
//! lineage table printed on stdout, and JSON export.
//!
//! # Usage
//!
//! ```ignore
//! use pedigree_sim::{merge_series, write_table, PedigreeRunner};
//! use pedigree_core::SimConfig;
//!
//! let result = PedigreeRunner::new(SimConfig::default()).run(1000, 2000.0)?;
//! let rows = merge_series(&result.paternal, &result.maternal);
//! write_table(&mut std::io::stdout(), &rows)?;
//! ```

pub mod cli;
mod error;
mod exporter;
mod runner;
pub mod table;

pub use cli::Args;
pub use error::CliError;
pub use exporter::RunExport;
pub use runner::{PedigreeRunner, RunResult};
pub use table::{merge_series, write_table, TableRow};
