//! Pedigree Core - Continuous-Time Population and Coalescence Simulator
//!
//! A population reproduces over continuous time through a discrete-event
//! engine. The survivors' ancestry is then walked backwards to find when
//! their paternal and maternal lines coalesce.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   lifespans,    ┌───────────────────────────────┐
//! │  AgeModel    │ ───waits──────► │          Simulator            │
//! └──────────────┘                 │  EventQueue ─► Birth / Death  │
//!                                  │                / Reproduction │
//!                                  │  Population (arena)           │
//!                                  │  living set                   │
//!                                  └──────────────┬────────────────┘
//!                                                 │ survivors
//!                                                 ▼
//!                                  ┌───────────────────────────────┐
//!                                  │ trace_coalescence (per sex)   │
//!                                  └───────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pedigree_core::{GompertzMakeham, Lineage, SimConfig, Simulator};
//!
//! let config = SimConfig::default();
//! let model = GompertzMakeham::from_config(&config)?;
//! let mut sim = Simulator::new(config, model)?;
//! sim.simulate(1000, 2000.0)?;
//!
//! let paternal = sim.trace(Lineage::Paternal);
//! let maternal = sim.trace(Lineage::Maternal);
//! ```

pub mod age_model;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod individual;
pub mod population;
pub mod tracer;

// Re-export key types for convenience
pub use age_model::{AgeModel, FixedAgeModel, GompertzMakeham};
pub use config::SimConfig;
pub use engine::{SimulationReport, SimulationStats, Simulator, StepOutcome};
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind};
pub use event_queue::{EventQueue, Scheduled};
pub use individual::{FertilityWindow, Individual, IndividualId, Sex};
pub use population::Population;
pub use tracer::{trace_coalescence, trace_maternal, trace_paternal, CoalescencePoint, Lineage};
