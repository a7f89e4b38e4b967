//! Timed write and read calls against the on-disk columnar format.
//!
//! The timer brackets only the storage call: file open, writer or reader
//! construction, encode or decode, and close. Table generation happens
//! before the clock starts.

use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use arrow::compute::concat_batches;
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchReader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::{ArrowWriter, ProjectionMask};
use parquet::file::properties::{EnabledStatistics, WriterProperties};

use crate::error::{BenchError, DecodeFailure, Result};
use crate::generator::SyntheticTable;
use crate::model::duration_micros;

/// A value together with the time it took to produce it.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    /// Produced value.
    pub value: T,
    /// Wall-clock time spent producing it.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in whole microseconds.
    pub fn micros(&self) -> u64 {
        duration_micros(self.elapsed)
    }
}

/// Storage backend exercised by the benchmark.
pub trait TableStore {
    /// Writes `table` to `path`, replacing any previous content, with row
    /// groups of at most `chunk_size` rows.
    fn write(&self, table: &SyntheticTable, path: &Path, chunk_size: u64) -> Result<Duration>;

    /// Materializes the table stored at `path`.
    ///
    /// With `columns` set, only those columns are read and the result has one
    /// column per requested index, in request order.
    fn read(&self, path: &Path, columns: Option<&[usize]>) -> Result<Timed<RecordBatch>>;
}

/// Parquet-backed [`TableStore`] with dictionary encoding disabled.
#[derive(Debug, Clone)]
pub struct ParquetStore {
    write_statistics: bool,
}

impl ParquetStore {
    /// Store that writes column statistics.
    pub fn new() -> Self {
        Self {
            write_statistics: true,
        }
    }

    /// Toggle column statistics in written files.
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.write_statistics = enabled;
        self
    }

    fn writer_properties(&self, chunk_size: u64) -> WriterProperties {
        let row_group_size = usize::try_from(chunk_size).unwrap_or(usize::MAX);
        let builder = WriterProperties::builder()
            .set_max_row_group_size(row_group_size)
            .set_dictionary_enabled(false);
        let builder = if self.write_statistics {
            builder
        } else {
            builder.set_statistics_enabled(EnabledStatistics::None)
        };
        builder.build()
    }
}

impl Default for ParquetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore for ParquetStore {
    fn write(&self, table: &SyntheticTable, path: &Path, chunk_size: u64) -> Result<Duration> {
        let props = self.writer_properties(chunk_size);

        let start = Instant::now();
        let file = File::create(path).map_err(|e| BenchError::io(path, e))?;
        let mut writer = ArrowWriter::try_new(file, table.schema(), Some(props))
            .map_err(|e| BenchError::encode(path, e))?;
        writer
            .write(table.batch())
            .map_err(|e| BenchError::encode(path, e))?;
        writer.close().map_err(|e| BenchError::encode(path, e))?;
        Ok(start.elapsed())
    }

    fn read(&self, path: &Path, columns: Option<&[usize]>) -> Result<Timed<RecordBatch>> {
        let start = Instant::now();
        let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
        let builder =
            ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| BenchError::decode(path, e))?;

        // One batch for the whole file, so the result is a single table.
        let total_rows = builder.metadata().file_metadata().num_rows();
        let builder = builder.with_batch_size(usize::try_from(total_rows).unwrap_or(0).max(1));

        let (builder, plan) = match columns {
            None => (builder, None),
            Some(indices) => {
                let plan = ProjectionPlan::new(indices, builder.schema().fields().len())
                    .map_err(|f| BenchError::decode(path, f))?;
                let mask =
                    ProjectionMask::roots(builder.parquet_schema(), plan.distinct.iter().copied());
                (builder.with_projection(mask), Some(plan))
            }
        };

        let reader = builder.build().map_err(|e| BenchError::decode(path, e))?;
        let schema = reader.schema();
        let batches = reader
            .collect::<std::result::Result<Vec<_>, ArrowError>>()
            .map_err(|e| BenchError::decode(path, e))?;
        let table = concat_batches(&schema, &batches).map_err(|e| BenchError::decode(path, e))?;
        let table = match plan {
            Some(plan) => table
                .project(&plan.positions)
                .map_err(|e| BenchError::decode(path, e))?,
            None => table,
        };

        Ok(Timed {
            value: table,
            elapsed: start.elapsed(),
        })
    }
}

/// Maps a requested index list onto the column order the reader produces.
///
/// The parquet reader yields each selected column once, in file order; the
/// requested list may be unordered and repeat indices.
#[derive(Debug, PartialEq, Eq)]
struct ProjectionPlan {
    /// Sorted, deduplicated indices handed to the reader.
    distinct: Vec<usize>,
    /// For every requested index, its position within `distinct`.
    positions: Vec<usize>,
}

impl ProjectionPlan {
    fn new(requested: &[usize], columns: usize) -> std::result::Result<Self, DecodeFailure> {
        if let Some(&index) = requested.iter().find(|&&i| i >= columns) {
            return Err(DecodeFailure::ColumnOutOfRange { index, columns });
        }
        let mut distinct = requested.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        let positions = requested
            .iter()
            .map(|i| distinct.binary_search(i).unwrap_or_default())
            .collect();
        Ok(Self {
            distinct,
            positions,
        })
    }
}
