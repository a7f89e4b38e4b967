//! Per-column cost tables built from a finished results file.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::error::{BenchError, Result};

/// One data row of a results file.
///
/// Headers may carry spaces after the commas and either micro sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResultRow {
    /// Column count.
    pub columns: u64,
    /// Row count.
    pub rows: u64,
    /// Row-group length.
    pub chunk_size: u64,
    /// Raw write duration.
    #[serde(rename = "writing(µs)", alias = "writing(μs)")]
    pub writing_micros: u64,
    /// Raw full-read duration.
    #[serde(rename = "reading_all(µs)", alias = "reading_all(μs)")]
    pub reading_all_micros: u64,
    /// Raw projected-read duration.
    #[serde(rename = "reading_100(µs)", alias = "reading_100(μs)")]
    pub reading_projection_micros: u64,
}

/// Normalized costs for one column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRow {
    /// Column count.
    pub columns: u64,
    /// Write µs per column.
    pub writing_per_column: f64,
    /// Full-read µs per column.
    pub reading_all_per_column: f64,
    /// Projected-read µs per projected column.
    pub reading_projection_per_column: f64,
}

/// All rows sharing a `(chunk_size, rows)` pair, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryGroup {
    /// Row-group length.
    pub chunk_size: u64,
    /// Row count.
    pub rows: u64,
    /// Normalized rows.
    pub entries: Vec<NormalizedRow>,
}

/// Loads every row of the results file at `path`.
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<ResultRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Groups rows by `(chunk_size, rows)` in ascending key order and divides
/// the durations the same way the progress lines do.
pub fn group_normalized(rows: &[ResultRow], projection_width: usize) -> Vec<SummaryGroup> {
    let width = projection_width.max(1) as f64;
    let mut groups: BTreeMap<(u64, u64), Vec<NormalizedRow>> = BTreeMap::new();
    for row in rows {
        let columns = row.columns.max(1) as f64;
        groups
            .entry((row.chunk_size, row.rows))
            .or_default()
            .push(NormalizedRow {
                columns: row.columns,
                writing_per_column: row.writing_micros as f64 / columns,
                reading_all_per_column: row.reading_all_micros as f64 / columns,
                reading_projection_per_column: row.reading_projection_micros as f64 / width,
            });
    }
    groups
        .into_iter()
        .map(|((chunk_size, rows), entries)| SummaryGroup {
            chunk_size,
            rows,
            entries,
        })
        .collect()
}

/// Renders groups as fixed-width text tables.
pub fn render(groups: &[SummaryGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "chunk_size={}, rows={}", group.chunk_size, group.rows);
        let _ = writeln!(
            out,
            "{:>10} {:>16} {:>16} {:>16}",
            "columns", "write µs/col", "read_all µs/col", "projected µs/col"
        );
        for entry in &group.entries {
            let _ = writeln!(
                out,
                "{:>10} {:>16.2} {:>16.2} {:>16.2}",
                entry.columns,
                entry.writing_per_column,
                entry.reading_all_per_column,
                entry.reading_projection_per_column
            );
        }
        out.push('\n');
    }
    out
}
