//! Parallel sweep execution and aggregation

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::simulation::runner::{SimulationResult, SimulationRunner};
use crate::sweep::config::{SweepConfig, SweepJob};

/// One output row: the swept parameters plus the run's statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub similarity_threshold: f64,
    pub races: u32,
    pub updates: u64,
    pub mean_similarity: f64,
}

impl SweepRecord {
    pub fn new(config: &SimulationConfig, result: SimulationResult) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            races: config.races,
            updates: result.updates,
            mean_similarity: result.mean_similarity,
        }
    }
}

/// Trial averages for one (threshold, races) combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub similarity_threshold: f64,
    pub races: u32,
    pub trials: u32,
    pub mean_updates: f64,
    pub mean_similarity: f64,
}

fn run_job(job: &SweepJob) -> Result<SweepRecord> {
    let result = SimulationRunner::new(job.config.clone())?.run()?;
    Ok(SweepRecord::new(&job.config, result))
}

/// Run every job of the sweep on the rayon pool
///
/// Runs share nothing, so they execute in any order; records come back in
/// plan order regardless of scheduling.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepRecord>> {
    config.validate()?;

    let jobs = config.plan();
    tracing::info!(
        "Starting sweep: {} thresholds x {} race counts x {} trials = {} runs on {}x{}",
        config.thresholds.len(),
        config.races.len(),
        config.trials,
        jobs.len(),
        config.width,
        config.height
    );

    let start = Instant::now();
    let records = jobs.par_iter().map(run_job).collect::<Result<Vec<_>>>()?;

    tracing::info!(
        "Sweep finished: {} runs in {:.2}ms",
        records.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(records)
}

#[derive(Default)]
struct Accumulator {
    trials: u32,
    updates: f64,
    similarity: f64,
}

/// Average records per (threshold, races), ordered by threshold then races
pub fn summarize(records: &[SweepRecord]) -> Vec<SweepSummary> {
    let mut groups: BTreeMap<(OrderedFloat<f64>, u32), Accumulator> = BTreeMap::new();

    for record in records {
        let acc = groups
            .entry((OrderedFloat(record.similarity_threshold), record.races))
            .or_default();
        acc.trials += 1;
        acc.updates += record.updates as f64;
        acc.similarity += record.mean_similarity;
    }

    groups
        .into_iter()
        .map(|((threshold, races), acc)| {
            let n = f64::from(acc.trials);
            SweepSummary {
                similarity_threshold: threshold.into_inner(),
                races,
                trials: acc.trials,
                mean_updates: acc.updates / n,
                mean_similarity: acc.similarity / n,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(threshold: f64, races: u32, updates: u64, mean_similarity: f64) -> SweepRecord {
        SweepRecord {
            similarity_threshold: threshold,
            races,
            updates,
            mean_similarity,
        }
    }

    #[test]
    fn test_summarize_groups_and_orders() {
        let records = [
            record(0.5, 3, 10, 0.6),
            record(0.1, 2, 0, 0.5),
            record(0.5, 3, 30, 0.8),
            record(0.5, 2, 4, 0.7),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.len(), 3);
        assert_eq!(
            (summary[0].similarity_threshold, summary[0].races),
            (0.1, 2)
        );
        assert_eq!(
            (summary[1].similarity_threshold, summary[1].races),
            (0.5, 2)
        );
        let last = summary[2];
        assert_eq!((last.similarity_threshold, last.races, last.trials), (0.5, 3, 2));
        assert!((last.mean_updates - 20.0).abs() < 1e-12);
        assert!((last.mean_similarity - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_small_sweep_matches_individual_runs() {
        let config = SweepConfig {
            width: 8,
            height: 8,
            update_limit: 200,
            thresholds: vec![0.0, 0.6],
            races: vec![2, 3],
            trials: 2,
            seed: 9,
            ..Default::default()
        };
        let records = run_sweep(&config).unwrap();
        assert_eq!(records.len(), config.run_count());

        for (job, record) in config.plan().iter().zip(&records) {
            let direct = SimulationRunner::new(job.config.clone()).unwrap().run().unwrap();
            assert_eq!(*record, SweepRecord::new(&job.config, direct));
        }
    }

    #[test]
    fn test_invalid_sweep_fails_before_running() {
        let config = SweepConfig {
            thresholds: vec![1.5],
            ..Default::default()
        };
        assert!(run_sweep(&config).is_err());
    }
}
