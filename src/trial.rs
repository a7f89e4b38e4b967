//! One write followed by repeated reads for a single parameter point.

use std::path::Path;

use tracing::debug;

use crate::context::BenchmarkContext;
use crate::error::Result;
use crate::generator::generate;
use crate::model::{
    duration_micros, Measurement, MeasurementKind, ParameterPoint, ProjectionSpec, ResultRecord,
};
use crate::storage::TableStore;

/// Number of times each read is repeated; the minimum is kept.
pub const READ_REPEATS: usize = 3;

/// Record plus the raw read samples it was reduced from.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    /// Aggregated record.
    pub record: ResultRecord,
    /// The single write measurement.
    pub write: Measurement,
    /// Every full-read sample, in the order taken.
    pub read_all: [Measurement; READ_REPEATS],
    /// Every projected-read sample, in the order taken.
    pub read_projection: [Measurement; READ_REPEATS],
}

/// Runs a trial and returns only the aggregated record.
pub fn run_trial<S: TableStore>(
    ctx: &mut BenchmarkContext<S>,
    point: ParameterPoint,
    projection: &ProjectionSpec,
) -> Result<ResultRecord> {
    run_trial_detailed(ctx, point, projection).map(|outcome| outcome.record)
}

/// Runs a trial, keeping the individual read samples.
///
/// The table is generated, written once and dropped; every read goes through
/// the artifact on disk. Any failure aborts the trial without a record.
pub fn run_trial_detailed<S: TableStore>(
    ctx: &mut BenchmarkContext<S>,
    point: ParameterPoint,
    projection: &ProjectionSpec,
) -> Result<TrialOutcome> {
    let (rng, store, path) = ctx.parts();

    let table = generate(rng, point.column_count, point.row_count)?;
    let write = Measurement {
        kind: MeasurementKind::Write,
        duration_micros: duration_micros(store.write(&table, path, point.chunk_size)?),
    };
    drop(table);
    debug!(%point, micros = write.duration_micros, "write");

    let read_all = repeat_read(store, path, MeasurementKind::ReadAll, None)?;
    let read_projection = repeat_read(
        store,
        path,
        MeasurementKind::ReadProjection,
        Some(projection.indices()),
    )?;

    let record = ResultRecord {
        point,
        write_micros: write.duration_micros,
        read_all_micros: fastest(&read_all),
        read_projection_micros: fastest(&read_projection),
    };
    Ok(TrialOutcome {
        record,
        write,
        read_all,
        read_projection,
    })
}

fn repeat_read<S: TableStore>(
    store: &S,
    path: &Path,
    kind: MeasurementKind,
    columns: Option<&[usize]>,
) -> Result<[Measurement; READ_REPEATS]> {
    let mut samples = [Measurement {
        kind,
        duration_micros: 0,
    }; READ_REPEATS];
    for (attempt, sample) in samples.iter_mut().enumerate() {
        let timed = store.read(path, columns)?;
        sample.duration_micros = timed.micros();
        debug!(kind = kind.label(), attempt, micros = sample.duration_micros, "read");
    }
    Ok(samples)
}

fn fastest(samples: &[Measurement]) -> u64 {
    samples
        .iter()
        .map(|m| m.duration_micros)
        .min()
        .unwrap_or_default()
}
