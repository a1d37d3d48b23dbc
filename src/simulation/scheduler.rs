//! UpdateScheduler - the relocation dynamics
//!
//! Each sweep visits every living occupant once, in row-major order of
//! their cells at the start of the sweep. An unsatisfied occupant moves to a
//! uniformly random empty cell (no search for a better cell). One move is
//! one update.
//!
//! A run ends when:
//! - a sweep makes no move (converged)
//! - the update counter reaches `update_limit` (stops mid-sweep)
//! - an unsatisfied occupant finds no empty cell (stalled)

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::OccupantId;
use crate::simulation::grid_state::GridState;
use crate::simulation::satisfaction::SatisfactionEvaluator;

/// Why the scheduler stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ScheduleOutcome {
    /// A full sweep made zero relocations
    Converged { sweeps: u64 },
    /// The update budget ran out; the population may still be unsettled
    LimitReached { sweeps: u64 },
    /// An unsatisfied occupant had nowhere to go
    Stalled { sweeps: u64 },
}

impl ScheduleOutcome {
    pub fn sweeps(&self) -> u64 {
        match *self {
            ScheduleOutcome::Converged { sweeps }
            | ScheduleOutcome::LimitReached { sweeps }
            | ScheduleOutcome::Stalled { sweeps } => sweeps,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, ScheduleOutcome::Converged { .. })
    }
}

/// Result of a single sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// At least one occupant moved and the sweep ran to the end
    Relocated(u64),
    /// Every occupant was satisfied
    Settled,
    LimitReached,
    Stalled,
}

pub struct UpdateScheduler {
    evaluator: SatisfactionEvaluator,
    update_limit: u64,
    updates: u64,
    sweeps: u64,
}

impl UpdateScheduler {
    pub fn new(similarity_threshold: f64, update_limit: u64) -> Self {
        Self {
            evaluator: SatisfactionEvaluator::new(similarity_threshold),
            update_limit,
            updates: 0,
            sweeps: 0,
        }
    }

    /// Relocations performed so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Sweeps started so far
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    pub fn evaluator(&self) -> &SatisfactionEvaluator {
        &self.evaluator
    }

    /// Run one sweep over the current population
    pub fn sweep<R: Rng + ?Sized>(&mut self, grid: &mut GridState, rng: &mut R) -> Result<SweepOutcome> {
        self.sweeps += 1;

        // Snapshot the order; occupants moved earlier in the sweep are still
        // visited exactly once, at their new cell.
        let order: Vec<OccupantId> = grid.occupants().collect();
        let mut moved = 0u64;

        for id in order {
            if self.evaluator.is_satisfied(grid, id) {
                continue;
            }

            if self.updates >= self.update_limit {
                return Ok(SweepOutcome::LimitReached);
            }

            let Some(target) = grid.random_empty_position(rng) else {
                return Ok(SweepOutcome::Stalled);
            };

            let from = grid.relocate(id, target)?;
            self.updates += 1;
            moved += 1;
            tracing::trace!("{} moved {} -> {}", id, from, target);

            if self.updates >= self.update_limit {
                return Ok(SweepOutcome::LimitReached);
            }
        }

        if moved == 0 {
            Ok(SweepOutcome::Settled)
        } else {
            Ok(SweepOutcome::Relocated(moved))
        }
    }

    /// Sweep until converged, stalled or out of budget
    pub fn run<R: Rng + ?Sized>(&mut self, grid: &mut GridState, rng: &mut R) -> Result<ScheduleOutcome> {
        loop {
            let outcome = self.sweep(grid, rng)?;
            let sweeps = self.sweeps;

            match outcome {
                SweepOutcome::Relocated(moved) => {
                    tracing::debug!(
                        "Sweep {}: {} relocations ({} total)",
                        sweeps,
                        moved,
                        self.updates
                    );
                }
                SweepOutcome::Settled => return Ok(ScheduleOutcome::Converged { sweeps }),
                SweepOutcome::LimitReached => return Ok(ScheduleOutcome::LimitReached { sweeps }),
                SweepOutcome::Stalled => return Ok(ScheduleOutcome::Stalled { sweeps }),
            }
        }
    }
}
