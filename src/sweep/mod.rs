//! Batch parameter sweep
//!
//! Repeats the simulation over a grid of (similarity_threshold, races)
//! combinations and collects one record per run.

pub mod config;
pub mod driver;
pub mod output;

pub use config::{SweepConfig, SweepJob};
pub use driver::{run_sweep, summarize, SweepRecord, SweepSummary};
pub use output::{write_csv, CsvRow, CsvWriter};
