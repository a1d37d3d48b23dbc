//! Integration tests for the batch sweep and its CSV output

use std::fs;

use schelling_sim::sweep::{write_csv, CsvRow, SweepConfig, SweepRecord, SweepSummary};
use schelling_sim::{run_sweep, summarize};

fn small_sweep() -> SweepConfig {
    SweepConfig {
        width: 10,
        height: 10,
        empty_ratio: 0.2,
        update_limit: 500,
        thresholds: vec![0.0, 0.5, 1.0],
        races: vec![2, 4],
        trials: 3,
        seed: 7,
    }
}

#[test]
fn test_sweep_is_reproducible() {
    let config = small_sweep();
    let first = run_sweep(&config).unwrap();
    let second = run_sweep(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sweep_records_follow_plan() {
    let config = small_sweep();
    let records = run_sweep(&config).unwrap();

    assert_eq!(records.len(), 3 * 2 * 3);
    for (job, record) in config.plan().iter().zip(&records) {
        assert_eq!(record.similarity_threshold, job.config.similarity_threshold);
        assert_eq!(record.races, job.config.races);
        assert!(record.updates <= config.update_limit);
        assert!((0.0..=1.0).contains(&record.mean_similarity));
    }

    // Zero threshold never moves anyone
    assert!(records
        .iter()
        .filter(|r| r.similarity_threshold == 0.0)
        .all(|r| r.updates == 0));
}

#[test]
fn test_sweep_writes_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("results.csv");
    let summary_path = dir.path().join("summary.csv");

    let records = run_sweep(&small_sweep()).unwrap();
    write_csv(&results_path, &records).unwrap();
    let summary = summarize(&records);
    write_csv(&summary_path, &summary).unwrap();

    let results = fs::read_to_string(&results_path).unwrap();
    let mut lines = results.lines();
    assert_eq!(
        lines.next(),
        Some("similarity_threshold,races,updates,mean_similarity")
    );
    let rows: Vec<_> = lines.collect();
    assert_eq!(rows.len(), records.len());
    for row in &rows {
        let fields: Vec<_> = row.split(',').collect();
        assert_eq!(fields.len(), 4);
        fields[0].parse::<f64>().unwrap();
        fields[1].parse::<u32>().unwrap();
        fields[2].parse::<u64>().unwrap();
        fields[3].parse::<f64>().unwrap();
    }

    let summary_text = fs::read_to_string(&summary_path).unwrap();
    assert_eq!(summary_text.lines().next(), Some(SweepSummary::HEADER));
    assert_eq!(summary_text.lines().count(), 1 + 3 * 2);
    assert!(summary.iter().all(|s| s.trials == 3));
}

#[test]
fn test_sweep_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.toml");
    fs::write(
        &path,
        "width = 6\nheight = 4\nthresholds = [0.25, 0.75]\nraces = [3]\ntrials = 2\nseed = 11\n",
    )
    .unwrap();

    let config = SweepConfig::from_file(&path).unwrap();
    assert_eq!((config.width, config.height), (6, 4));
    assert_eq!(config.run_count(), 4);

    let records: Vec<SweepRecord> = run_sweep(&config).unwrap();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.races == 3));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SweepConfig::from_file(&dir.path().join("nope.toml")).is_err());
}

#[test]
fn test_record_header_column_order() {
    assert_eq!(
        SweepRecord::HEADER,
        "similarity_threshold,races,updates,mean_similarity"
    );
}
