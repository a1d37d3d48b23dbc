//! Schelling Sim - Schelling segregation model engine
//!
//! Occupants of several races live on a bounded grid with some empty cells.
//! Unsatisfied occupants move to random empty cells until everyone is
//! satisfied or the update budget runs out.

pub mod core;
pub mod simulation;
pub mod spatial;
pub mod sweep;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{ConfigError, Result, SimError};
pub use crate::simulation::{simulate, ScheduleOutcome, SimulationResult, SimulationRunner};
pub use crate::sweep::{run_sweep, summarize, SweepConfig, SweepRecord, SweepSummary};
