//! Progress lines on the console and one CSV row per parameter point.

use std::fs::File;
use std::io::{self, Stderr, Write};
use std::path::Path;

use csv::Writer;

use crate::error::{BenchError, Result};
use crate::model::ResultRecord;

/// Column names of the results file, in order.
pub const CSV_HEADER: [&str; 6] = [
    "columns",
    "rows",
    "chunk_size",
    "writing(µs)",
    "reading_all(µs)",
    "reading_100(µs)",
];

/// Emits every finished record to the console and to the results sink.
///
/// The sink header is written on construction; each row is flushed as soon
/// as it is written so an aborted sweep leaves a valid prefix behind.
pub struct Reporter<C: Write, W: Write> {
    console: C,
    sink: Writer<W>,
    projection_width: usize,
    rows: usize,
}

impl Reporter<Stderr, File> {
    /// Creates (truncating) the results file at `path` and reports progress
    /// on stderr.
    pub fn create(path: impl AsRef<Path>, projection_width: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| BenchError::io(path, e))?;
        Self::new(io::stderr(), file, projection_width)
    }
}

impl<C: Write, W: Write> Reporter<C, W> {
    /// Wraps an arbitrary console and sink, writing the header immediately.
    pub fn new(console: C, sink: W, projection_width: usize) -> Result<Self> {
        let mut sink = Writer::from_writer(sink);
        sink.write_record(CSV_HEADER)?;
        sink.flush().map_err(csv::Error::from)?;
        Ok(Self {
            console,
            sink,
            projection_width,
            rows: 0,
        })
    }

    /// Writes the progress line and appends the raw row.
    pub fn emit(&mut self, record: &ResultRecord) -> Result<()> {
        writeln!(self.console, "{}", progress_line(record, self.projection_width))
            .map_err(csv::Error::from)?;

        let point = record.point;
        self.sink.write_record(&[
            point.column_count.to_string(),
            point.row_count.to_string(),
            point.chunk_size.to_string(),
            record.write_micros.to_string(),
            record.read_all_micros.to_string(),
            record.read_projection_micros.to_string(),
        ])?;
        self.sink.flush().map_err(csv::Error::from)?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes both outputs.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(csv::Error::from)?;
        self.console.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the console and sink.
    pub fn into_parts(mut self) -> Result<(C, W)> {
        self.flush()?;
        let sink = self
            .sink
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok((self.console, sink))
    }
}

/// Human-readable, per-column normalized summary of a record.
///
/// Write and full-read costs are divided by the column count, the projected
/// read by the projection width. Integer division, like the raw columns.
pub fn progress_line(record: &ResultRecord, projection_width: usize) -> String {
    let point = record.point;
    let columns = point.column_count as u64;
    let width = projection_width as u64;
    format!(
        "{point}, writing_dt={}, reading_all_dt={}, reading_{projection_width}_dt={}",
        record.write_micros.checked_div(columns).unwrap_or(0),
        record.read_all_micros.checked_div(columns).unwrap_or(0),
        record.read_projection_micros.checked_div(width).unwrap_or(0),
    )
}
