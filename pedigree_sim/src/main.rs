//! Pedigree simulator CLI
//!
//! `pedigree-sim <n> <t_max>` simulates `n` founders up to `t_max` and
//! prints the paternal and maternal lineage counts over time.

use clap::error::ErrorKind;
use clap::Parser;
use pedigree_sim::{merge_series, write_table, Args, CliError, PedigreeRunner, RunExport};
use std::io::{self, Write};
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn run(args: &Args) -> Result<(), CliError> {
    let runner = PedigreeRunner::new(args.to_config());
    info!(
        "Simulating {} founders to t={} (seed {})",
        args.population,
        args.t_max,
        runner.config().seed
    );
    let result = runner.run(args.population_size(), args.t_max)?;

    if let Some(path) = &args.export {
        RunExport::from(&result).write_to_file(path)?;
        info!("Exported run to {}", path);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        writeln!(out, "{}", RunExport::from(&result).to_json_pretty()?)?;
    } else {
        let rows = merge_series(&result.paternal, &result.maternal);
        write_table(&mut out, &rows)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            eprintln!("Usage: pedigree-sim <n> <t_max>");
            std::process::exit(1);
        }
    };

    // Initialize logging; stdout carries the table
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
