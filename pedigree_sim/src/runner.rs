//! Run driver - simulates a population and traces both parental lines.

use pedigree_core::{
    CoalescencePoint, GompertzMakeham, Lineage, SimConfig, SimResult, SimulationStats, Simulator,
};
use tracing::{debug, info};

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Configuration used
    pub config: SimConfig,

    /// Number of founders
    pub population_size: usize,

    /// Simulation horizon
    pub t_max: f64,

    /// Number of individuals alive at the end
    pub survivors: usize,

    /// Paternal lineage counts, merges most recent first
    pub paternal: Vec<CoalescencePoint>,

    /// Maternal lineage counts, merges most recent first
    pub maternal: Vec<CoalescencePoint>,

    /// Engine counters
    pub stats: SimulationStats,
}

/// Runs the simulator with the default Gompertz-Makeham lifespans.
pub struct PedigreeRunner {
    config: SimConfig,
}

impl PedigreeRunner {
    /// Creates a runner for the given configuration.
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulates `population_size` founders up to `t_max` and traces the
    /// survivors.
    pub fn run(&self, population_size: usize, t_max: f64) -> SimResult<RunResult> {
        let model = GompertzMakeham::from_config(&self.config)?;
        let mut sim = Simulator::new(self.config.clone(), model)?;
        let report = sim.simulate(population_size, t_max)?;

        let paternal = sim.trace(Lineage::Paternal);
        let maternal = sim.trace(Lineage::Maternal);

        info!(
            "{} survivors: {} paternal / {} maternal lineages",
            report.survivors.len(),
            paternal.first().map_or(0, |p| p.lineages),
            maternal.first().map_or(0, |p| p.lineages),
        );
        for (lineage, series) in [(Lineage::Paternal, &paternal), (Lineage::Maternal, &maternal)] {
            debug!("{}: {} merges", lineage.name(), series.len() - 1);
        }
        debug!(
            "stale={} horizon={} abandoned(absent={}, age={}, partner={}) faithful={} peak={}",
            report.stats.stale_discarded,
            report.stats.past_horizon,
            report.stats.abandoned_mother_absent,
            report.stats.abandoned_not_mating_age,
            report.stats.abandoned_no_partner,
            report.stats.faithful_matings,
            report.stats.peak_living,
        );

        Ok(RunResult {
            config: self.config.clone(),
            population_size,
            t_max,
            survivors: report.survivors.len(),
            paternal,
            maternal,
            stats: report.stats,
        })
    }
}
