use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::storage::{ParquetStore, TableStore};

/// State shared by every trial of a run.
///
/// Built once at start-up and passed down explicitly: the random source for
/// table generation, the storage backend, and the single artifact path that
/// every write overwrites.
#[derive(Debug)]
pub struct BenchmarkContext<S = ParquetStore> {
    rng: ChaCha8Rng,
    seed: Option<u64>,
    store: S,
    artifact_path: PathBuf,
}

impl<S: TableStore> BenchmarkContext<S> {
    /// Context whose random source is seeded from OS entropy.
    pub fn new(store: S, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
            store,
            artifact_path: artifact_path.into(),
        }
    }

    /// Context with a reproducible random source.
    pub fn with_seed(store: S, artifact_path: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
            store,
            artifact_path: artifact_path.into(),
        }
    }

    /// Path of the reused on-disk artifact.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Seed, when one was supplied.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Storage backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn parts(&mut self) -> (&mut ChaCha8Rng, &S, &Path) {
        (&mut self.rng, &self.store, &self.artifact_path)
    }
}
