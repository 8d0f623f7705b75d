//! Discrete-event simulation engine.
//!
//! The engine owns the event queue, the arena of individuals and the
//! living set. Every random draw goes through the single `rng` it owns,
//! so a seed fully determines a run.
//!
//! # Event loop
//!
//! ```text
//! extract_min ──► time > t_max? ──yes──► discard rest, stop
//!                      │ no
//!                      ▼
//!                 stale? ──yes──► drop
//!                      │ no
//!                      ▼
//!        Birth / Death / Reproduction handler
//! ```
//!
//! Stale events are never removed from the queue when a death becomes
//! known; they are filtered when they come up (see [`Event::is_stale`]).

use crate::age_model::AgeModel;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::event::{Event, EventKind};
use crate::event_queue::EventQueue;
use crate::individual::{Individual, IndividualId, Sex};
use crate::population::Population;
use crate::tracer::{trace_coalescence, CoalescencePoint, Lineage};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, trace};

/// Counters collected while the event loop runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Events handed to a handler
    pub events_dispatched: u64,

    /// Events dropped because the subject was already dead
    pub stale_discarded: u64,

    /// Events left unprocessed past the horizon
    pub past_horizon: u64,

    /// Birth events processed
    pub births: u64,

    /// Death events that removed someone from the living set
    pub deaths: u64,

    /// Death events for someone already absent
    pub deaths_ignored: u64,

    /// Reproduction events processed
    pub reproduction_attempts: u64,

    /// Children conceived
    pub offspring: u64,

    /// Attempts abandoned because the mother was not living
    pub abandoned_mother_absent: u64,

    /// Attempts abandoned because the mother was outside her fertile ages
    pub abandoned_not_mating_age: u64,

    /// Attempts abandoned because no male was available
    pub abandoned_no_partner: u64,

    /// Conceptions with the previous mate kept through fidelity
    pub faithful_matings: u64,

    /// Largest living set observed
    pub peak_living: usize,

    /// Time of the last dispatched event
    pub last_event_time: f64,
}

/// What a single call to [`Simulator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The event was handled
    Dispatched(Event),

    /// The event's subject was already dead; nothing happened
    Stale(Event),

    /// The event lies past the horizon; it and every queued event were dropped
    Horizon(Event),

    /// Nothing left to process
    Exhausted,
}

/// Result of a complete [`Simulator::simulate`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// Individuals alive when the run stopped, in id order
    pub survivors: Vec<IndividualId>,

    /// Counters for the run
    pub stats: SimulationStats,
}

/// The population simulator.
pub struct Simulator<M: AgeModel, R: Rng = ChaCha8Rng> {
    config: SimConfig,

    model: M,

    rng: R,

    queue: EventQueue<Event>,

    population: Population,

    /// Ordered by id so partner draws are reproducible
    living: BTreeSet<IndividualId>,

    stats: SimulationStats,
}

impl<M: AgeModel> Simulator<M, ChaCha8Rng> {
    /// Creates a simulator seeded from `config.seed`.
    pub fn new(config: SimConfig, model: M) -> SimResult<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, model, rng)
    }
}

impl<M: AgeModel, R: Rng> Simulator<M, R> {
    /// Creates a simulator drawing from the given random source.
    pub fn with_rng(config: SimConfig, model: M, rng: R) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            rng,
            queue: EventQueue::new(),
            population: Population::new(),
            living: BTreeSet::new(),
            stats: SimulationStats::default(),
        })
    }

    /// Seeds `n` founders and runs the event loop up to `t_max`.
    pub fn simulate(&mut self, n: usize, t_max: f64) -> SimResult<SimulationReport> {
        if n == 0 {
            return Err(SimError::argument("population size must be positive"));
        }
        if !t_max.is_finite() || t_max < 0.0 {
            return Err(SimError::argument(format!(
                "t_max must be a finite non-negative number, got {}",
                t_max
            )));
        }
        if !self.population.is_empty() {
            return Err(SimError::argument("simulator has already been seeded"));
        }

        info!("Simulating {} founders up to t={} (seed={})", n, t_max, self.config.seed);
        self.seed_founders(n)?;
        self.run_until(t_max)?;

        info!(
            "Stopped at t={:.2}: {} living, {} born, {} died, {} offspring",
            self.stats.last_event_time,
            self.living.len(),
            self.stats.births,
            self.stats.deaths,
            self.stats.offspring
        );

        Ok(SimulationReport {
            survivors: self.living(),
            stats: self.stats.clone(),
        })
    }

    /// Creates `n` founders with random sexes, each born at time 0.
    pub fn seed_founders(&mut self, n: usize) -> SimResult<Vec<IndividualId>> {
        let mut founders = Vec::with_capacity(n);
        for _ in 0..n {
            let sex = Sex::random(&mut self.rng);
            founders.push(self.add_founder(sex)?);
        }
        Ok(founders)
    }

    /// Creates one founder of the given sex and schedules its birth at 0.
    ///
    /// The founder receives a provisional lifespan now; the definitive
    /// death time is drawn when the birth is processed.
    pub fn add_founder(&mut self, sex: Sex) -> SimResult<IndividualId> {
        let provisional = self.draw_age()?;
        let id = self.population.spawn(Individual::founder(sex));
        self.population.set_death_time(id, provisional);
        self.queue.insert(Event::birth(0.0, id));
        trace!("Founder {} ({})", id, sex.symbol());
        Ok(id)
    }

    /// Processes events until one lies past `t_max` or the queue drains.
    pub fn run_until(&mut self, t_max: f64) -> SimResult<()> {
        loop {
            match self.step(t_max)? {
                StepOutcome::Horizon(_) | StepOutcome::Exhausted => return Ok(()),
                StepOutcome::Dispatched(_) | StepOutcome::Stale(_) => {}
            }
        }
    }

    /// Takes the next event off the queue and handles it.
    pub fn step(&mut self, t_max: f64) -> SimResult<StepOutcome> {
        let Some(event) = self.queue.extract_min() else {
            return Ok(StepOutcome::Exhausted);
        };

        if event.time > t_max {
            let dropped = 1 + self.queue.len() as u64;
            debug!("Horizon reached at t={:.2}, dropping {} events", event.time, dropped);
            self.stats.past_horizon += dropped;
            self.queue.clear();
            return Ok(StepOutcome::Horizon(event));
        }

        if event.is_stale(self.population[event.subject].death_time()) {
            self.stats.stale_discarded += 1;
            return Ok(StepOutcome::Stale(event));
        }

        trace!("t={:.3} {:?} {}", event.time, event.kind, event.subject);
        match event.kind {
            EventKind::Birth => self.handle_birth(&event)?,
            EventKind::Death => self.handle_death(&event),
            EventKind::Reproduction => self.handle_reproduction(&event)?,
        }
        self.stats.events_dispatched += 1;
        self.stats.last_event_time = event.time;

        Ok(StepOutcome::Dispatched(event))
    }

    fn handle_birth(&mut self, event: &Event) -> SimResult<()> {
        let id = event.subject;
        let death_time = event.time + self.draw_age()?;
        self.population.set_death_time(id, death_time);
        self.living.insert(id);
        self.queue.insert(Event::death(death_time, id));

        if self.population[id].sex() == Sex::Female {
            let wait = self.draw_waiting_time()?;
            self.queue.insert(Event::reproduction(event.time + wait, id));
        }

        self.stats.births += 1;
        self.stats.peak_living = self.stats.peak_living.max(self.living.len());
        Ok(())
    }

    fn handle_death(&mut self, event: &Event) {
        if self.living.remove(&event.subject) {
            self.stats.deaths += 1;
        } else {
            self.stats.deaths_ignored += 1;
        }
    }

    /// A failed attempt schedules nothing: the mother's reproductive
    /// timeline only continues from a successful conception.
    fn handle_reproduction(&mut self, event: &Event) -> SimResult<()> {
        let mother = event.subject;
        let time = event.time;
        self.stats.reproduction_attempts += 1;

        if !self.is_living(mother) {
            self.stats.abandoned_mother_absent += 1;
            return Ok(());
        }
        let mother_ind = &self.population[mother];
        if !mother_ind.is_mating_age(time, self.config.fertility(mother_ind.sex())) {
            self.stats.abandoned_not_mating_age += 1;
            return Ok(());
        }

        let Some(father) = self.select_partner(mother, time) else {
            self.stats.abandoned_no_partner += 1;
            return Ok(());
        };

        let sex = Sex::random(&mut self.rng);
        let child = self
            .population
            .spawn(Individual::offspring(mother, father, time, sex));
        self.queue.insert(Event::birth(time, child));
        self.population.pair(mother, father);
        self.stats.offspring += 1;
        trace!("{} + {} -> {} ({})", mother, father, child, sex.symbol());

        let wait = self.draw_waiting_time()?;
        self.queue.insert(Event::reproduction(time + wait, mother));
        Ok(())
    }

    /// Picks the father for a conception at `time`.
    ///
    /// The previous mate is kept with probability `fidelity` while the
    /// relationship holds; otherwise any living male of mating age is drawn
    /// uniformly.
    fn select_partner(&mut self, mother: IndividualId, time: f64) -> Option<IndividualId> {
        if self.population.in_relationship(mother, time)
            && self.rng.gen::<f64>() < self.config.fidelity
        {
            if let Some(mate) = self.population[mother].mate() {
                self.stats.faithful_matings += 1;
                return Some(mate);
            }
        }

        let window = self.config.fertility(Sex::Male);
        let candidates: Vec<IndividualId> = self
            .living
            .iter()
            .copied()
            .filter(|&id| {
                let ind = &self.population[id];
                ind.sex() == Sex::Male && ind.is_mating_age(time, window)
            })
            .collect();

        candidates.choose(&mut self.rng).copied()
    }

    fn draw_age(&mut self) -> SimResult<f64> {
        let age = self.model.random_age(&mut self.rng);
        check_variate("lifespan", age)
    }

    fn draw_waiting_time(&mut self) -> SimResult<f64> {
        let wait = self
            .model
            .random_waiting_time(&mut self.rng, self.config.reproduction_rate);
        check_variate("waiting time", wait)
    }

    /// Copy of the living set, in id order.
    pub fn living(&self) -> Vec<IndividualId> {
        self.living.iter().copied().collect()
    }

    pub fn living_len(&self) -> usize {
        self.living.len()
    }

    pub fn is_living(&self, id: IndividualId) -> bool {
        self.living.contains(&id)
    }

    /// Everyone ever created, including the dead.
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Traces the given lineage through the current living set.
    pub fn trace(&self, lineage: Lineage) -> Vec<CoalescencePoint> {
        trace_coalescence(&self.population, &self.living(), lineage)
    }
}

/// Rejects variates that would corrupt event ordering.
fn check_variate(what: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidVariate { what, value })
    }
}
