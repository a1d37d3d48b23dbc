//! One complete simulation run: initialize, iterate, summarize

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::simulation::grid_state::GridState;
use crate::simulation::metrics::mean_similarity;
use crate::simulation::scheduler::{ScheduleOutcome, UpdateScheduler};

/// Summary statistics of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Relocations performed, never above `update_limit`
    pub updates: u64,
    /// Mean similarity ratio of the final population, in [0, 1]
    pub mean_similarity: f64,
}

/// Runs are independent: each owns its grid and an RNG seeded from
/// `config.seed`, so runs can execute on any thread in any order.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    /// Validates eagerly so a bad config fails before any grid is built
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SimulationResult> {
        self.run_with_outcome().map(|(result, _)| result)
    }

    /// Run and also report why the scheduler stopped
    pub fn run_with_outcome(&self) -> Result<(SimulationResult, ScheduleOutcome)> {
        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let mut grid = GridState::initialize(config, &mut rng)?;
        tracing::debug!(
            "Populated {}x{} grid: {} occupants, {} empty, {} races",
            grid.width(),
            grid.height(),
            grid.occupant_count(),
            grid.empty_count(),
            config.races
        );

        let mut scheduler = UpdateScheduler::new(config.similarity_threshold, config.update_limit);
        let outcome = scheduler.run(&mut grid, &mut rng)?;

        let result = SimulationResult {
            updates: scheduler.updates(),
            mean_similarity: mean_similarity(&grid),
        };
        tracing::debug!(
            "Run finished (seed {}): {:?}, {} updates, mean similarity {:.4}",
            config.seed,
            outcome,
            result.updates,
            result.mean_similarity
        );

        Ok((result, outcome))
    }
}

/// Run a single simulation from `config`
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult> {
    SimulationRunner::new(config.clone())?.run()
}
