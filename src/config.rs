use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BenchError, Result};
use crate::model::ProjectionSpec;
use crate::sweep::SweepAxes;

/// Everything a sweep needs, loadable from TOML.
///
/// Missing keys fall back to the reference configuration.
///
/// ```toml
/// chunk_sizes = [1000, 100000]
/// row_counts = [5000]
/// column_counts = [100, 200, 300]
/// results_path = "results.csv"
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Row-group lengths, outermost axis.
    pub chunk_sizes: Vec<u64>,
    /// Rows per table.
    pub row_counts: Vec<usize>,
    /// Columns per table, innermost axis.
    pub column_counts: Vec<usize>,
    /// Column indices used by every projected read.
    pub projection: Vec<usize>,
    /// Reused on-disk artifact.
    pub artifact_path: PathBuf,
    /// Results file, truncated at start.
    pub results_path: PathBuf,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Whether written files carry column statistics.
    pub write_statistics: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            chunk_sizes: vec![1_000, 100_000],
            row_counts: vec![5_000],
            column_counts: reference_column_counts(),
            projection: (0..100).collect(),
            artifact_path: std::env::temp_dir().join("widebench.parquet"),
            results_path: PathBuf::from("results_rust.csv"),
            seed: None,
            write_statistics: true,
        }
    }
}

/// 100..=900 by 100, 1000..=9000 by 1000, 10000..=50000 by 10000.
pub fn reference_column_counts() -> Vec<usize> {
    (1..=9)
        .map(|i| i * 100)
        .chain((1..=9).map(|i| i * 1_000))
        .chain((1..=5).map(|i| i * 10_000))
        .collect()
}

impl SweepConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BenchError::Config {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;
        Self::from_toml_str(&contents).map_err(|source| BenchError::Config {
            path: path.to_path_buf(),
            message: source.to_string(),
        })
    }

    /// Rejects empty axes and zero axis values.
    ///
    /// Projection indices are not checked against the column counts; an
    /// index past the narrowest table fails that trial's projected read.
    pub fn validate(&self) -> Result<()> {
        check_axis("chunk_sizes", &self.chunk_sizes, |v| *v == 0)?;
        check_axis("row_counts", &self.row_counts, |v| *v == 0)?;
        check_axis("column_counts", &self.column_counts, |v| *v == 0)?;
        Ok(())
    }

    /// Swept axes in configured order.
    pub fn axes(&self) -> SweepAxes {
        SweepAxes {
            chunk_sizes: self.chunk_sizes.clone(),
            row_counts: self.row_counts.clone(),
            column_counts: self.column_counts.clone(),
        }
    }

    /// Projection used for partial reads.
    pub fn projection(&self) -> ProjectionSpec {
        ProjectionSpec::new(self.projection.clone())
    }
}

fn check_axis<T>(name: &str, values: &[T], is_zero: impl Fn(&T) -> bool) -> Result<()> {
    if values.is_empty() {
        return Err(BenchError::InvalidParameter(format!("{name} must not be empty")));
    }
    if values.iter().any(is_zero) {
        return Err(BenchError::InvalidParameter(format!(
            "{name} values must be positive"
        )));
    }
    Ok(())
}
