//! Arena holding every individual created during a run.
//!
//! The arena never shrinks. Being alive is tracked separately by the
//! engine's living set; the arena only answers "who is this and who are
//! their parents", which the coalescence tracer needs long after death.

use crate::individual::{Individual, IndividualId};
use std::ops::Index;

/// Append-only store of individuals, addressed by [`IndividualId`].
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an individual and returns its identity.
    pub fn spawn(&mut self, individual: Individual) -> IndividualId {
        let id = IndividualId(self.individuals.len());
        self.individuals.push(individual);
        id
    }

    /// Looks up an individual.
    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(id.0)
    }

    /// Number of individuals ever created.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Iterates over every individual with its id, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (IndividualId, &Individual)> {
        self.individuals
            .iter()
            .enumerate()
            .map(|(i, ind)| (IndividualId(i), ind))
    }

    /// Returns true if `id` has a mate who is still alive at `time` and
    /// whose own most recent mate is `id`.
    pub fn in_relationship(&self, id: IndividualId, time: f64) -> bool {
        let Some(mate_id) = self[id].mate() else {
            return false;
        };
        let mate = &self[mate_id];
        mate.is_alive_at(time) && mate.mate() == Some(id)
    }

    pub(crate) fn set_death_time(&mut self, id: IndividualId, death_time: f64) {
        self.individuals[id.0].set_death_time(death_time);
    }

    /// Records `a` and `b` as each other's current mate.
    pub(crate) fn pair(&mut self, a: IndividualId, b: IndividualId) {
        self.individuals[a.0].set_mate(b);
        self.individuals[b.0].set_mate(a);
    }
}

impl Index<IndividualId> for Population {
    type Output = Individual;

    fn index(&self, id: IndividualId) -> &Individual {
        &self.individuals[id.0]
    }
}
