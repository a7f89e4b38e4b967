//! Cartesian sweep over chunk size, row count and column count.

use std::io::Write;
use std::vec;

use tracing::{error, info};

use crate::context::BenchmarkContext;
use crate::error::Result;
use crate::model::{ParameterPoint, ProjectionSpec, ResultRecord};
use crate::report::Reporter;
use crate::storage::TableStore;
use crate::trial::run_trial;

/// Ordered values for each swept axis.
///
/// Iteration order is chunk sizes outermost, then row counts, then column
/// counts, each in the order given here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepAxes {
    /// Row-group lengths.
    pub chunk_sizes: Vec<u64>,
    /// Rows per table.
    pub row_counts: Vec<usize>,
    /// Columns per table.
    pub column_counts: Vec<usize>,
}

impl SweepAxes {
    /// Every parameter point, in sweep order.
    pub fn points(&self) -> Result<Vec<ParameterPoint>> {
        let mut points = Vec::with_capacity(self.len());
        for &chunk_size in &self.chunk_sizes {
            for &row_count in &self.row_counts {
                for &column_count in &self.column_counts {
                    points.push(ParameterPoint::new(column_count, row_count, chunk_size)?);
                }
            }
        }
        Ok(points)
    }

    /// Number of parameter points the sweep visits.
    pub fn len(&self) -> usize {
        self.chunk_sizes.len() * self.row_counts.len() * self.column_counts.len()
    }

    /// Returns `true` when any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lazy sequence of trial results.
///
/// Each call to `next` runs one trial. After the first error the sweep is
/// exhausted and yields nothing further.
pub struct Sweep<'a, S: TableStore> {
    ctx: &'a mut BenchmarkContext<S>,
    projection: &'a ProjectionSpec,
    points: vec::IntoIter<ParameterPoint>,
    halted: bool,
}

impl<S: TableStore> Iterator for Sweep<'_, S> {
    type Item = Result<ResultRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let point = self.points.next()?;
        let result = run_trial(self.ctx, point, self.projection);
        if result.is_err() {
            self.halted = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            (0, Some(0))
        } else {
            (0, Some(self.points.len()))
        }
    }
}

/// Starts a sweep over `axes`. Nothing runs until the result is iterated.
///
/// Fails up front only if an axis value is zero.
pub fn run_sweep<'a, S: TableStore>(
    ctx: &'a mut BenchmarkContext<S>,
    axes: &SweepAxes,
    projection: &'a ProjectionSpec,
) -> Result<Sweep<'a, S>> {
    let points = axes.points()?;
    Ok(Sweep {
        ctx,
        projection,
        points: points.into_iter(),
        halted: false,
    })
}

/// Totals for a finished sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    /// Records emitted to the reporter.
    pub records: usize,
}

/// Runs the whole sweep, emitting each record as soon as its trial finishes.
///
/// The reporter is flushed whether the sweep completes or fails, so rows
/// already emitted stay usable after an error.
pub fn drive<S, C, W>(
    ctx: &mut BenchmarkContext<S>,
    axes: &SweepAxes,
    projection: &ProjectionSpec,
    reporter: &mut Reporter<C, W>,
) -> Result<SweepSummary>
where
    S: TableStore,
    C: Write,
    W: Write,
{
    info!(
        points = axes.len(),
        artifact = %ctx.artifact_path().display(),
        seed = ?ctx.seed(),
        "starting sweep"
    );

    let outcome = emit_all(ctx, axes, projection, reporter);
    let flushed = reporter.flush();

    match (outcome, flushed) {
        (Ok(records), Ok(())) => {
            info!(records, "sweep complete");
            Ok(SweepSummary { records })
        }
        (Err(err), _) | (Ok(_), Err(err)) => {
            error!(error = %err, "sweep aborted");
            Err(err)
        }
    }
}

fn emit_all<S, C, W>(
    ctx: &mut BenchmarkContext<S>,
    axes: &SweepAxes,
    projection: &ProjectionSpec,
    reporter: &mut Reporter<C, W>,
) -> Result<usize>
where
    S: TableStore,
    C: Write,
    W: Write,
{
    let mut records = 0;
    for record in run_sweep(ctx, axes, projection)? {
        reporter.emit(&record?)?;
        records += 1;
    }
    Ok(records)
}
