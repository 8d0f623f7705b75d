//! Individuals: identity, sex, lifecycle timestamps and kinship links.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex of an individual. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Draws a sex with a fair coin.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Sex::Female
        } else {
            Sex::Male
        }
    }

    /// Returns the short label used in logs.
    pub fn symbol(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// Stable identity of an individual for the whole run.
///
/// Ids index into the [`Population`](crate::Population) arena, so two
/// individuals with identical attributes are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndividualId(pub(crate) usize);

impl IndividualId {
    /// Returns the arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inclusive age range in which an individual can reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FertilityWindow {
    /// Youngest fertile age
    pub min_age: f64,

    /// Oldest fertile age
    pub max_age: f64,
}

impl FertilityWindow {
    pub fn new(min_age: f64, max_age: f64) -> Self {
        Self { min_age, max_age }
    }

    /// Returns true if `age` falls inside the window.
    pub fn contains(&self, age: f64) -> bool {
        age >= self.min_age && age <= self.max_age
    }
}

/// One organism of the simulated population.
///
/// Parent and mate links are ids, not owning references. The arena keeps
/// every individual ever created, so ancestors remain reachable after they
/// leave the living set.
#[derive(Debug, Clone)]
pub struct Individual {
    sex: Sex,

    birth_time: f64,

    /// `+∞` until the Birth event assigns the definitive value
    death_time: f64,

    mother: Option<IndividualId>,

    father: Option<IndividualId>,

    /// Most recent reproductive partner
    mate: Option<IndividualId>,
}

impl Individual {
    /// Creates a founder: born at time 0, no parents.
    pub fn founder(sex: Sex) -> Self {
        Self {
            sex,
            birth_time: 0.0,
            death_time: f64::INFINITY,
            mother: None,
            father: None,
            mate: None,
        }
    }

    /// Creates an offspring born at `birth_time`.
    pub fn offspring(
        mother: IndividualId,
        father: IndividualId,
        birth_time: f64,
        sex: Sex,
    ) -> Self {
        Self {
            sex,
            birth_time,
            death_time: f64::INFINITY,
            mother: Some(mother),
            father: Some(father),
            mate: None,
        }
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn birth_time(&self) -> f64 {
        self.birth_time
    }

    pub fn death_time(&self) -> f64 {
        self.death_time
    }

    pub fn mother(&self) -> Option<IndividualId> {
        self.mother
    }

    pub fn father(&self) -> Option<IndividualId> {
        self.father
    }

    pub fn mate(&self) -> Option<IndividualId> {
        self.mate
    }

    /// Returns true if the individual has no recorded parents.
    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }

    /// Age at `time` (negative before birth).
    pub fn age_at(&self, time: f64) -> f64 {
        time - self.birth_time
    }

    /// Returns true if the individual has not yet died at `time`.
    pub fn is_alive_at(&self, time: f64) -> bool {
        time < self.death_time
    }

    /// Alive at `time` and inside its fertility window.
    pub fn is_mating_age(&self, time: f64, window: &FertilityWindow) -> bool {
        self.is_alive_at(time) && window.contains(self.age_at(time))
    }

    pub(crate) fn set_death_time(&mut self, death_time: f64) {
        self.death_time = death_time;
    }

    pub(crate) fn set_mate(&mut self, mate: IndividualId) {
        self.mate = Some(mate);
    }
}
