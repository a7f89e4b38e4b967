use crate::error::{BenchError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global `tracing` subscriber, logging to stderr.
///
/// `level` accepts any `EnvFilter` directive, e.g. `info` or
/// `widebench=debug,parquet=warn`.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| BenchError::InvalidParameter(format!("invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| BenchError::InvalidParameter("logging already initialized".into()))
}
