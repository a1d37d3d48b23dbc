//! Schelling simulation engine
//!
//! - [`grid_state`]: cell occupancy, empty set and relocation
//! - [`satisfaction`]: similarity ratio and the threshold rule
//! - [`scheduler`]: sweep loop and termination policy
//! - [`metrics`]: population-wide mean similarity
//! - [`runner`]: one seeded run from config to result

pub mod grid_state;
pub mod metrics;
pub mod runner;
pub mod satisfaction;
pub mod scheduler;

pub use grid_state::GridState;
pub use metrics::mean_similarity;
pub use runner::{simulate, SimulationResult, SimulationRunner};
pub use satisfaction::{is_satisfied, similarity_ratio, SatisfactionEvaluator};
pub use scheduler::{ScheduleOutcome, SweepOutcome, UpdateScheduler};
