//! Parameter sweep configuration
//!
//! A sweep runs every (similarity_threshold, races) combination `trials`
//! times on otherwise identical grids. Loaded from TOML; any missing field
//! falls back to the default sweep.
//!
//! ```toml
//! width = 30
//! height = 30
//! empty_ratio = 0.2
//! update_limit = 5000
//! thresholds = [0.0, 0.25, 0.5, 0.75, 1.0]
//! races = [2, 3, 4]
//! trials = 10
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::config::SimulationConfig;
use crate::core::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub width: usize,
    pub height: usize,
    pub empty_ratio: f64,
    pub update_limit: u64,
    /// Similarity thresholds to sweep, each in [0, 1]
    pub thresholds: Vec<f64>,
    /// Race counts to sweep, each >= 1
    pub races: Vec<u32>,
    /// Repetitions per (threshold, races) combination
    pub trials: u32,
    /// Base seed; run `i` of the plan uses `seed + i`
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            empty_ratio: 0.2,
            update_limit: 5_000,
            // 0.0, 0.1, ..., 1.0
            thresholds: (0..=10).map(|i| f64::from(i) / 10.0).collect(),
            races: vec![2, 3, 4, 5],
            trials: 5,
            seed: 42,
        }
    }
}

/// One scheduled run of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepJob {
    /// Position in the plan, also the seed offset
    pub index: usize,
    pub trial: u32,
    pub config: SimulationConfig,
}

impl SweepConfig {
    /// Loads a sweep from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses a sweep from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Total number of runs in the plan
    pub fn run_count(&self) -> usize {
        self.thresholds.len() * self.races.len() * self.trials as usize
    }

    /// Single-run config for one combination
    pub fn run_config(&self, similarity_threshold: f64, races: u32, seed: u64) -> SimulationConfig {
        SimulationConfig {
            width: self.width,
            height: self.height,
            empty_ratio: self.empty_ratio,
            similarity_threshold,
            races,
            update_limit: self.update_limit,
            seed,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.thresholds.is_empty() {
            return Err(ConfigError::EmptySweepAxis("thresholds"));
        }
        if self.races.is_empty() {
            return Err(ConfigError::EmptySweepAxis("races"));
        }
        if self.trials == 0 {
            return Err(ConfigError::NoTrials);
        }

        for &threshold in &self.thresholds {
            for &races in &self.races {
                self.run_config(threshold, races, self.seed).validate()?;
            }
        }

        Ok(())
    }

    /// Every run of the sweep, threshold-major, then races, then trial
    pub fn plan(&self) -> Vec<SweepJob> {
        let mut jobs = Vec::with_capacity(self.run_count());

        for &threshold in &self.thresholds {
            for &races in &self.races {
                for trial in 0..self.trials {
                    let index = jobs.len();
                    let seed = self.seed.wrapping_add(index as u64);
                    jobs.push(SweepJob {
                        index,
                        trial,
                        config: self.run_config(threshold, races, seed),
                    });
                }
            }
        }

        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep_is_valid() {
        let config = SweepConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.len(), 11);
        assert_eq!(config.run_count(), 11 * 4 * 5);
    }

    #[test]
    fn test_plan_order_and_seeds() {
        let config = SweepConfig {
            thresholds: vec![0.2, 0.8],
            races: vec![2, 3],
            trials: 2,
            seed: 100,
            ..Default::default()
        };
        let plan = config.plan();

        assert_eq!(plan.len(), 8);
        let axes: Vec<_> = plan
            .iter()
            .map(|j| (j.config.similarity_threshold, j.config.races, j.trial))
            .collect();
        assert_eq!(
            axes,
            vec![
                (0.2, 2, 0),
                (0.2, 2, 1),
                (0.2, 3, 0),
                (0.2, 3, 1),
                (0.8, 2, 0),
                (0.8, 2, 1),
                (0.8, 3, 0),
                (0.8, 3, 1),
            ]
        );
        for (i, job) in plan.iter().enumerate() {
            assert_eq!(job.index, i);
            assert_eq!(job.config.seed, 100 + i as u64);
        }
    }

    #[test]
    fn test_rejects_empty_axes() {
        let config = SweepConfig {
            thresholds: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySweepAxis("thresholds")));

        let config = SweepConfig {
            races: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySweepAxis("races")));

        let config = SweepConfig {
            trials: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoTrials));
    }

    #[test]
    fn test_rejects_bad_combination() {
        let config = SweepConfig {
            races: vec![2, 0],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoRaces));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = SweepConfig::from_toml("trials = 3\nraces = [2]\n").unwrap();
        assert_eq!(config.trials, 3);
        assert_eq!(config.races, vec![2]);
        assert_eq!(config.width, 30);
    }

    #[test]
    fn test_parse_bad_toml() {
        assert!(matches!(
            SweepConfig::from_toml("trials = \"many\""),
            Err(crate::core::error::SimError::TomlError(_))
        ));
    }
}
