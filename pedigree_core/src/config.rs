//! Simulation parameters.

use crate::error::{SimError, SimResult};
use crate::individual::{FertilityWindow, Sex};
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Master seed for the single random source
    pub seed: u64,

    /// Constant accident hazard (per year)
    pub accident_rate: f64,

    /// Ageing hazard growth; must exceed 1
    pub death_rate: f64,

    /// Age scale of the ageing hazard (years)
    pub age_scale: f64,

    /// Rate of a female's reproduction attempts (per year)
    pub reproduction_rate: f64,

    /// Probability of repeating with the previous mate
    pub fidelity: f64,

    /// Fertile ages for females
    pub female_fertility: FertilityWindow,

    /// Fertile ages for males
    pub male_fertility: FertilityWindow,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            accident_rate: 0.01,
            death_rate: 12.5,
            age_scale: 100.0,
            reproduction_rate: 0.2,
            fidelity: 0.9,
            female_fertility: FertilityWindow::new(16.0, 50.0),
            male_fertility: FertilityWindow::new(16.0, 73.0),
        }
    }
}

impl SimConfig {
    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the fidelity probability.
    pub fn with_fidelity(mut self, fidelity: f64) -> Self {
        self.fidelity = fidelity;
        self
    }

    /// Sets the reproduction rate.
    pub fn with_reproduction_rate(mut self, rate: f64) -> Self {
        self.reproduction_rate = rate;
        self
    }

    /// Fertility window for the given sex.
    pub fn fertility(&self, sex: Sex) -> &FertilityWindow {
        match sex {
            Sex::Female => &self.female_fertility,
            Sex::Male => &self.male_fertility,
        }
    }

    /// Checks the engine parameters.
    ///
    /// Lifespan parameters are checked by the age model that consumes them.
    pub fn validate(&self) -> SimResult<()> {
        if !self.reproduction_rate.is_finite() || self.reproduction_rate <= 0.0 {
            return Err(SimError::config(
                "reproduction_rate",
                self.reproduction_rate,
                "must be finite and > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.fidelity) {
            return Err(SimError::config("fidelity", self.fidelity, "must be within [0, 1]"));
        }
        for (field, window) in [
            ("female_fertility", &self.female_fertility),
            ("male_fertility", &self.male_fertility),
        ] {
            if !(window.min_age >= 0.0 && window.min_age <= window.max_age) {
                return Err(SimError::config(
                    field,
                    window.min_age,
                    "needs 0 <= min_age <= max_age",
                ));
            }
        }
        Ok(())
    }
}
