use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::export::row::{CSV_HEADER, Row};

/// CSV sink for process rows.
///
/// The header is written exactly once per invocation, immediately on open. An
/// append-mode run keeps existing file contents, so N append-mode invocations
/// leave N header rows in the file.
pub struct CsvExporter {
    writer: Writer<File>,
}

impl CsvExporter {
    pub fn create(path: &Path, append: bool) -> Result<Self> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)
        } else {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
        }
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

        let mut writer = Writer::from_writer(file);
        writer.write_record(CSV_HEADER)?;

        Ok(Self { writer })
    }

    pub fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.writer.write_record(row.fields())?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// `{prefix}-processes.csv`, or `processes.csv` without a prefix.
pub fn output_filename(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}-processes.csv"),
        None => "processes.csv".to_string(),
    }
}

/// Append when forced by the flag or when a query file drives the run, so
/// multi-query batches accumulate instead of clobbering.
pub fn append_mode(append_flag: bool, has_queryfile: bool) -> bool {
    append_flag || has_queryfile
}
