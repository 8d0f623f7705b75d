//! Command-line arguments.

use clap::Parser;
use pedigree_core::SimConfig;
use std::time::{SystemTime, UNIX_EPOCH};

/// Simulate a population and print when its paternal and maternal
/// lineages coalesce
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pedigree-sim")]
#[command(
    about = "Continuous-time pedigree simulation with coalescence tracing",
    long_about = None
)]
pub struct Args {
    /// Number of founders
    #[arg(value_parser = parse_population)]
    pub population: usize,

    /// Maximum simulation time (years)
    #[arg(value_parser = parse_horizon)]
    pub t_max: f64,

    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    pub seed: u64,

    /// Constant accident hazard
    #[arg(long, default_value = "0.01")]
    pub accident_rate: f64,

    /// Ageing hazard growth (> 1)
    #[arg(long, default_value = "12.5")]
    pub death_rate: f64,

    /// Age scale of the ageing hazard
    #[arg(long, default_value = "100")]
    pub age_scale: f64,

    /// Rate of a female's reproduction attempts
    #[arg(short, long, default_value = "0.2")]
    pub reproduction_rate: f64,

    /// Probability of repeating with the previous mate
    #[arg(short, long, default_value = "0.9")]
    pub fidelity: f64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a JSON document instead of the table
    #[arg(long)]
    pub json: bool,

    /// Also write the run as JSON to this file
    #[arg(long)]
    pub export: Option<String>,
}

fn parse_population(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("not a founder count: {}", e)),
    }
}

fn parse_horizon(s: &str) -> Result<f64, String> {
    let t: f64 = s.parse().map_err(|e| format!("not a number: {}", e))?;
    if t.is_finite() && t >= 0.0 {
        Ok(t)
    } else {
        Err(format!("must be finite and non-negative, got {}", s))
    }
}

impl Args {
    /// Seed to use, resolving 0 to the wall clock.
    pub fn resolved_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    }

    /// Builds the simulation configuration from the flags.
    pub fn to_config(&self) -> SimConfig {
        SimConfig {
            seed: self.resolved_seed(),
            accident_rate: self.accident_rate,
            death_rate: self.death_rate,
            age_scale: self.age_scale,
            reproduction_rate: self.reproduction_rate,
            fidelity: self.fidelity,
            ..SimConfig::default()
        }
    }

    pub fn population_size(&self) -> usize {
        self.population
    }
}
