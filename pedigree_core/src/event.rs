//! Scheduled events.

use crate::event_queue::Scheduled;
use crate::individual::IndividualId;
use serde::{Deserialize, Serialize};

/// What happens to the subject of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Birth,
    Death,
    Reproduction,
}

/// Immutable record of something scheduled to happen to one individual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: f64,
    pub subject: IndividualId,
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: f64, subject: IndividualId, kind: EventKind) -> Self {
        Self { time, subject, kind }
    }

    pub fn birth(time: f64, subject: IndividualId) -> Self {
        Self::new(time, subject, EventKind::Birth)
    }

    pub fn death(time: f64, subject: IndividualId) -> Self {
        Self::new(time, subject, EventKind::Death)
    }

    pub fn reproduction(time: f64, subject: IndividualId) -> Self {
        Self::new(time, subject, EventKind::Reproduction)
    }

    /// Returns true if the subject is already dead when this event fires.
    ///
    /// A Death event is scheduled at exactly the subject's death time and
    /// is valid there; anything else at or past that time is stale.
    pub fn is_stale(&self, death_time: f64) -> bool {
        match self.kind {
            EventKind::Death => self.time > death_time,
            EventKind::Birth | EventKind::Reproduction => self.time >= death_time,
        }
    }
}

impl Scheduled for Event {
    fn time(&self) -> f64 {
        self.time
    }
}
