//! Write and read latency benchmark for wide Parquet tables.
//!
//! A sweep visits every combination of row-group length, row count and
//! column count. For each combination a synthetic table of random doubles is
//! written once to a reused artifact, then read back in full and through a
//! fixed column projection, each read repeated and reduced to its fastest
//! sample. Results stream to the console and to a CSV file.
//!
//! ```no_run
//! use widebench::{drive, BenchmarkContext, ParquetStore, Reporter, SweepConfig};
//!
//! # fn main() -> widebench::Result<()> {
//! let config = SweepConfig::default();
//! let projection = config.projection();
//! let mut ctx = BenchmarkContext::new(ParquetStore::new(), &config.artifact_path);
//! let mut reporter = Reporter::create(&config.results_path, projection.len())?;
//! drive(&mut ctx, &config.axes(), &projection, &mut reporter)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod report;
pub mod storage;
pub mod summary;
pub mod sweep;
pub mod trial;

pub use config::SweepConfig;
pub use context::BenchmarkContext;
pub use error::{BenchError, DecodeFailure, ErrorKind, Result};
pub use generator::{generate, SyntheticTable};
pub use model::{Measurement, MeasurementKind, ParameterPoint, ProjectionSpec, ResultRecord};
pub use report::Reporter;
pub use storage::{ParquetStore, TableStore, Timed};
pub use sweep::{drive, run_sweep, Sweep, SweepAxes, SweepSummary};
pub use trial::{run_trial, run_trial_detailed, TrialOutcome, READ_REPEATS};
