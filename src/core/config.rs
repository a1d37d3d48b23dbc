//! Simulation configuration with documented parameters
//!
//! One `SimulationConfig` fully determines a run, seed included: two runs
//! with equal configs produce equal results.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Largest grid a run accepts, in cells
pub const MAX_CELLS: usize = u32::MAX as usize;

/// Parameters for a single Schelling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === GRID ===
    /// Number of columns in the city grid
    pub width: usize,

    /// Number of rows in the city grid
    pub height: usize,

    /// Fraction of cells left unoccupied, in [0, 1)
    ///
    /// Empty cells are the only relocation targets, so this shapes how much
    /// room unsatisfied occupants have to move. At 0.0 nobody can move.
    pub empty_ratio: f64,

    // === BEHAVIOUR ===
    /// Minimum same-race fraction of occupied neighbours an occupant accepts
    ///
    /// 0.0 satisfies everyone immediately; 1.0 only accepts fully
    /// homogeneous neighbourhoods.
    pub similarity_threshold: f64,

    /// Number of distinct races populating the grid
    pub races: u32,

    // === BUDGET ===
    /// Hard cap on relocations per run
    pub update_limit: u64,

    /// Seed for the run's private RNG stream
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            empty_ratio: 0.2,
            similarity_threshold: 0.4,
            races: 2,
            update_limit: 10_000,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of occupants placed at initialization
    ///
    /// `round(width * height * (1 - empty_ratio))`, never more than the
    /// number of cells.
    pub fn occupant_count(&self) -> usize {
        let cells = self.cell_count();
        let raw = (cells as f64 * (1.0 - self.empty_ratio)).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(cells)
        }
    }

    /// Validate configuration before any grid is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }

        // Occupant ids are u32, so every cell must be addressable by one
        let fits = self
            .width
            .checked_mul(self.height)
            .is_some_and(|cells| cells <= MAX_CELLS);
        if !fits {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        // Negated comparisons so NaN is rejected too
        if !(self.empty_ratio >= 0.0 && self.empty_ratio < 1.0) {
            return Err(ConfigError::EmptyRatioOutOfRange(self.empty_ratio));
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.similarity_threshold));
        }

        if self.races < 1 {
            return Err(ConfigError::NoRaces);
        }

        Ok(())
    }
}
