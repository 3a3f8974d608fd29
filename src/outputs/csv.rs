//! CSV row sink.
//!
//! The header is written and flushed as soon as the file is created, so the
//! output is a valid table even when no identifier produces a row. Multi-line
//! cells (goods lists, addresses) are quoted by the `csv` writer and stay within
//! one logical cell.

use crate::errors::ScrapeError;
use crate::utils::ensure_parent_dir;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Append-only CSV output for one run.
#[derive(Debug)]
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl CsvSink {
    /// Create (or truncate) `path` and write `header` as its first record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot be
    /// written; this is the one failure that aborts a run.
    #[instrument(level = "info", skip(header), fields(path = %path.display()))]
    pub fn create(path: &Path, header: &[&str]) -> Result<Self, ScrapeError> {
        ensure_parent_dir(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(header)?;
        writer.flush()?;
        info!(columns = header.len(), "Wrote CSV header");
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    /// Serialize one row in field order.
    pub fn write_row<R: Serialize>(&mut self, row: &R) -> Result<(), ScrapeError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        debug!(rows = self.rows, "Wrote CSV row");
        Ok(())
    }

    /// Flush and close the file, returning the number of data rows written.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub fn finish(mut self) -> Result<usize, ScrapeError> {
        self.writer.flush()?;
        info!(rows = self.rows, "Closed CSV output");
        Ok(self.rows)
    }
}
