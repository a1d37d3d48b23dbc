//! Population-wide summary metric

use crate::simulation::grid_state::GridState;
use crate::simulation::satisfaction::similarity_ratio;

/// Arithmetic mean of every occupant's similarity ratio
///
/// Independent of the satisfaction threshold. Neighbourless occupants count
/// as 1.0; an unpopulated grid yields 0.0.
pub fn mean_similarity(grid: &GridState) -> f64 {
    let count = grid.occupant_count();
    if count == 0 {
        return 0.0;
    }

    let total: f64 = grid.occupants().map(|id| similarity_ratio(grid, id)).sum();
    let mean = total / count as f64;
    debug_assert!((0.0..=1.0).contains(&mean), "mean similarity {} out of range", mean);
    mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Position, Race};

    #[test]
    fn test_empty_grid_is_zero() {
        let grid = GridState::from_layout(4, 4, &[]).unwrap();
        assert_eq!(mean_similarity(&grid), 0.0);
    }

    #[test]
    fn test_single_occupant_is_one() {
        let grid = GridState::from_layout(1, 1, &[(Position::new(0, 0), Race(0))]).unwrap();
        assert_eq!(mean_similarity(&grid), 1.0);
    }

    #[test]
    fn test_mixed_pair() {
        // Two different-race neighbours: both at 0.0
        let grid = GridState::from_layout(
            2,
            1,
            &[(Position::new(0, 0), Race(0)), (Position::new(0, 1), Race(1))],
        )
        .unwrap();
        assert_eq!(mean_similarity(&grid), 0.0);
    }

    #[test]
    fn test_mean_over_occupants() {
        // Row of three: A A B
        // left: 1/1, middle: 1/2, right: 0/1 -> mean 0.5
        let grid = GridState::from_layout(
            3,
            1,
            &[
                (Position::new(0, 0), Race(0)),
                (Position::new(0, 1), Race(0)),
                (Position::new(0, 2), Race(1)),
            ],
        )
        .unwrap();
        assert!((mean_similarity(&grid) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_isolated_occupants_count_as_one() {
        // Two occupants far apart, different races
        let grid = GridState::from_layout(
            3,
            1,
            &[(Position::new(0, 0), Race(0)), (Position::new(0, 2), Race(1))],
        )
        .unwrap();
        assert_eq!(mean_similarity(&grid), 1.0);
    }
}
