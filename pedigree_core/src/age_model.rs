//! Lifespan and waiting-time variates.
//!
//! The engine only relies on the [`AgeModel`] contract: every value is
//! finite and non-negative, and the same seeded source gives the same
//! sequence. [`GompertzMakeham`] is the default model.

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Exp, Exp1};

/// Source of random lifespans and inter-event waiting times.
pub trait AgeModel {
    /// Draws a lifespan.
    fn random_age<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Draws a waiting time for a process with the given rate.
    fn random_waiting_time<R: Rng + ?Sized>(&self, rng: &mut R, rate: f64) -> f64 {
        exponential(rng, rate)
    }
}

/// Exponential variate, NaN if `rate` is not a valid rate.
fn exponential<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> f64 {
    Exp::new(rate).map(|d| d.sample(rng)).unwrap_or(f64::NAN)
}

// =============================================================================
// GOMPERTZ-MAKEHAM
// =============================================================================

/// Constant accident hazard plus exponentially increasing ageing hazard.
///
/// Survival function:
/// ```text
/// S(a) = exp(-λ·a - (κ^(a/s) - 1) / κ)
/// ```
/// with accident rate `λ`, death rate `κ` (> 1) and age scale `s`.
/// A lifespan is the earlier of two independent clocks: an `Exp(λ)`
/// accident and the ageing clock `s·ln(1 + κ·E) / ln κ` with `E ~ Exp(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GompertzMakeham {
    accident_rate: f64,
    death_rate: f64,
    age_scale: f64,
    log_death_rate: f64,
}

impl GompertzMakeham {
    /// Creates the model, rejecting parameters outside their domain.
    pub fn new(accident_rate: f64, death_rate: f64, age_scale: f64) -> SimResult<Self> {
        if !accident_rate.is_finite() || accident_rate < 0.0 {
            return Err(SimError::config("accident_rate", accident_rate, "must be finite and >= 0"));
        }
        if !death_rate.is_finite() || death_rate <= 1.0 {
            return Err(SimError::config("death_rate", death_rate, "must be finite and > 1"));
        }
        if !age_scale.is_finite() || age_scale <= 0.0 {
            return Err(SimError::config("age_scale", age_scale, "must be finite and > 0"));
        }

        Ok(Self {
            accident_rate,
            death_rate,
            age_scale,
            log_death_rate: death_rate.ln(),
        })
    }

    /// Builds the model from the lifespan fields of a configuration.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        Self::new(config.accident_rate, config.death_rate, config.age_scale)
    }

    pub fn accident_rate(&self) -> f64 {
        self.accident_rate
    }

    pub fn death_rate(&self) -> f64 {
        self.death_rate
    }

    pub fn age_scale(&self) -> f64 {
        self.age_scale
    }

    /// Probability of surviving past `age`.
    pub fn survival(&self, age: f64) -> f64 {
        if age <= 0.0 {
            return 1.0;
        }
        let ageing = (age * self.log_death_rate / self.age_scale).exp_m1() / self.death_rate;
        (-self.accident_rate * age - ageing).exp()
    }
}

impl AgeModel for GompertzMakeham {
    fn random_age<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let accident = if self.accident_rate > 0.0 {
            exponential(rng, self.accident_rate)
        } else {
            f64::INFINITY
        };
        let e: f64 = Exp1.sample(rng);
        let ageing = self.age_scale * (self.death_rate * e).ln_1p() / self.log_death_rate;
        accident.min(ageing)
    }
}

// =============================================================================
// FIXED
// =============================================================================

/// Deterministic model returning constant values.
///
/// Useful to reproduce scenarios exactly; it still consumes no randomness,
/// so the remaining draws (sex, partner choice) stay seeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAgeModel {
    /// Lifespan returned by every `random_age` call
    pub lifespan: f64,

    /// Waiting time returned regardless of rate
    pub waiting_time: f64,
}

impl FixedAgeModel {
    pub fn new(lifespan: f64, waiting_time: f64) -> Self {
        Self { lifespan, waiting_time }
    }
}

impl AgeModel for FixedAgeModel {
    fn random_age<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        self.lifespan
    }

    fn random_waiting_time<R: Rng + ?Sized>(&self, _rng: &mut R, _rate: f64) -> f64 {
        self.waiting_time
    }
}
