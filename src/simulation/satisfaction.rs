//! Satisfaction rule over a grid snapshot

use crate::core::types::OccupantId;
use crate::simulation::grid_state::GridState;

/// Fraction of an occupant's occupied neighbours that share its race
///
/// An occupant with no occupied neighbours is vacuously at 1.0.
pub fn similarity_ratio(grid: &GridState, id: OccupantId) -> f64 {
    let race = grid.race_of(id);
    let (same, total) = grid
        .occupied_neighbors(grid.position_of(id))
        .fold((0u32, 0u32), |(same, total), other| {
            (same + u32::from(grid.race_of(other) == race), total + 1)
        });

    if total == 0 {
        1.0
    } else {
        f64::from(same) / f64::from(total)
    }
}

pub fn is_satisfied(grid: &GridState, id: OccupantId, threshold: f64) -> bool {
    similarity_ratio(grid, id) >= threshold
}

/// Satisfaction test bound to a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatisfactionEvaluator {
    threshold: f64,
}

impl SatisfactionEvaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn is_satisfied(&self, grid: &GridState, id: OccupantId) -> bool {
        is_satisfied(grid, id, self.threshold)
    }

    /// Occupants currently below the threshold
    pub fn unsatisfied_count(&self, grid: &GridState) -> usize {
        grid.occupants().filter(|&id| !self.is_satisfied(grid, id)).count()
    }

    pub fn all_satisfied(&self, grid: &GridState) -> bool {
        grid.occupants().all(|id| self.is_satisfied(grid, id))
    }
}
