use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use rand::Rng;

use crate::error::{BenchError, Result};

/// Name of the column at `index` in a synthetic table.
pub fn column_name(index: usize) -> String {
    format!("c_{index}")
}

/// Schema of `column_count` non-nullable float64 columns `c_0 .. c_{n-1}`.
pub fn synthetic_schema(column_count: usize) -> SchemaRef {
    let fields: Vec<Field> = (0..column_count)
        .map(|i| Field::new(column_name(i), DataType::Float64, false))
        .collect();
    Arc::new(Schema::new(fields))
}

/// In-memory table of uniformly distributed doubles in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SyntheticTable {
    batch: RecordBatch,
}

impl SyntheticTable {
    /// Borrow the table as a record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Schema of the table.
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Number of rows per column.
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Consume the table and return the record batch.
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }
}

/// Generates a fresh synthetic table, drawing every value from `rng`.
///
/// Columns are filled one after another so a given seed always yields the
/// same table.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    column_count: usize,
    row_count: usize,
) -> Result<SyntheticTable> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(column_count);
    for _ in 0..column_count {
        let mut builder = Float64Builder::with_capacity(row_count);
        for _ in 0..row_count {
            builder.append_value(rng.gen::<f64>());
        }
        columns.push(Arc::new(builder.finish()));
    }

    let batch = RecordBatch::try_new(synthetic_schema(column_count), columns).map_err(
        |source| BenchError::Allocation {
            column: column_count,
            source,
        },
    )?;
    Ok(SyntheticTable { batch })
}
