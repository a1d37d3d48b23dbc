//! CSV output for sweep results
//!
//! A single writer owns the sink; parallel runs hand their records back to
//! the driver, which writes them in plan order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

use crate::sweep::driver::{SweepRecord, SweepSummary};

/// A type that renders as one CSV row under a fixed header
pub trait CsvRow {
    const HEADER: &'static str;

    fn write_row<W: Write>(&self, out: &mut W) -> std::io::Result<()>;
}

impl CsvRow for SweepRecord {
    const HEADER: &'static str = "similarity_threshold,races,updates,mean_similarity";

    fn write_row<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{},{},{},{:.4}",
            self.similarity_threshold, self.races, self.updates, self.mean_similarity
        )
    }
}

impl CsvRow for SweepSummary {
    const HEADER: &'static str = "similarity_threshold,races,trials,mean_updates,mean_similarity";

    fn write_row<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{},{},{},{:.2},{:.4}",
            self.similarity_threshold,
            self.races,
            self.trials,
            self.mean_updates,
            self.mean_similarity
        )
    }
}

/// Buffered CSV writer; the header goes out on construction
pub struct CsvWriter<W: Write, R: CsvRow> {
    writer: BufWriter<W>,
    rows: u64,
    _row: PhantomData<R>,
}

impl<R: CsvRow> CsvWriter<File, R> {
    /// Create (or truncate) a CSV file at `path`
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write, R: CsvRow> CsvWriter<W, R> {
    pub fn new(inner: W) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(inner);
        writeln!(writer, "{}", R::HEADER)?;
        Ok(Self {
            writer,
            rows: 0,
            _row: PhantomData,
        })
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn write(&mut self, row: &R) -> std::io::Result<()> {
        row.write_row(&mut self.writer)?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_all(&mut self, rows: &[R]) -> std::io::Result<()> {
        for row in rows {
            self.write(row)?;
        }
        Ok(())
    }

    /// Flush and hand back the underlying sink
    pub fn finish(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

/// Write `rows` to a fresh CSV file at `path`
pub fn write_csv<R: CsvRow>(path: impl AsRef<Path>, rows: &[R]) -> std::io::Result<()> {
    let mut writer = CsvWriter::<File, R>::create(path)?;
    writer.write_all(rows)?;
    writer.finish()?;
    Ok(())
}
