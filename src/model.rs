//! Value types shared by the trial runner, sweep driver and reporter.

use std::fmt;
use std::ops::Range;
use std::time::Duration;

use crate::error::{BenchError, Result};

/// One combination of the swept axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterPoint {
    /// Number of columns in the synthetic table.
    pub column_count: usize,
    /// Number of rows in every column.
    pub row_count: usize,
    /// Maximum rows per row group on disk.
    pub chunk_size: u64,
}

impl ParameterPoint {
    /// Builds a point, rejecting zero values.
    pub fn new(column_count: usize, row_count: usize, chunk_size: u64) -> Result<Self> {
        if column_count == 0 || row_count == 0 || chunk_size == 0 {
            return Err(BenchError::InvalidParameter(format!(
                "parameter point must be positive: columns={column_count}, rows={row_count}, chunk_size={chunk_size}"
            )));
        }
        Ok(Self {
            column_count,
            row_count,
            chunk_size,
        })
    }
}

impl fmt::Display for ParameterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}), chunk_size={}",
            self.column_count, self.row_count, self.chunk_size
        )
    }
}

/// Which operation a measurement timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    /// Full table write.
    Write,
    /// Read of every column.
    ReadAll,
    /// Read of the projection subset.
    ReadProjection,
}

impl MeasurementKind {
    /// Short label used in log output.
    pub fn label(self) -> &'static str {
        match self {
            MeasurementKind::Write => "write",
            MeasurementKind::ReadAll => "read_all",
            MeasurementKind::ReadProjection => "read_projection",
        }
    }
}

/// A single timed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Operation that was timed.
    pub kind: MeasurementKind,
    /// Wall-clock duration in whole microseconds.
    pub duration_micros: u64,
}

/// Whole microseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Aggregated result for one parameter point.
///
/// Read durations are the minimum over the repeated reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRecord {
    /// Parameter point the durations belong to.
    pub point: ParameterPoint,
    /// Single write duration.
    pub write_micros: u64,
    /// Fastest full read.
    pub read_all_micros: u64,
    /// Fastest projected read.
    pub read_projection_micros: u64,
}

/// Fixed, ordered column index list used for every partial read in a run.
///
/// Order is significant and duplicates are kept; the projected table has one
/// column per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSpec {
    indices: Vec<usize>,
}

impl ProjectionSpec {
    /// Projection over an explicit index list.
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Projection over a contiguous index range.
    pub fn range(range: Range<usize>) -> Self {
        Self {
            indices: range.collect(),
        }
    }

    /// Requested indices, in order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of columns a projected read yields.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` when the projection selects nothing.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl Default for ProjectionSpec {
    /// The first hundred columns.
    fn default() -> Self {
        Self::range(0..100)
    }
}
