//! Binary entry point for the wide-table benchmark.
#![forbid(unsafe_code)]

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use widebench::{
    drive, logging::init_logging, summary, BenchmarkContext, ParquetStore, Reporter, SweepConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "widebench",
    version,
    about = "Parquet write/read latency sweep over wide tables",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "RUST_LOG",
        default_value = "warn",
        help = "Log filter directive (e.g. info, widebench=debug)"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Run the sweep and write the results file")]
    Run(RunCmd),

    #[command(about = "Print per-column costs from a results file")]
    Summary {
        #[arg(value_name = "CSV")]
        path: PathBuf,

        #[arg(
            long,
            default_value_t = 100,
            help = "Projection width the results were taken with"
        )]
        projection_size: usize,
    },
}

#[derive(Args, Debug)]
struct RunCmd {
    #[arg(
        long,
        value_name = "FILE",
        env = "WIDEBENCH_CONFIG",
        help = "TOML sweep configuration"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "N,N",
        value_delimiter = ',',
        help = "Row-group lengths (outer axis)"
    )]
    chunk_sizes: Option<Vec<u64>>,

    #[arg(long, value_name = "N,N", value_delimiter = ',', help = "Row counts")]
    rows: Option<Vec<usize>>,

    #[arg(
        long,
        value_name = "N,N",
        value_delimiter = ',',
        help = "Column counts (inner axis)"
    )]
    columns: Option<Vec<usize>>,

    #[arg(long, help = "Project columns 0..N on partial reads")]
    projection_size: Option<usize>,

    #[arg(long, value_name = "FILE", help = "Reused Parquet artifact path")]
    artifact: Option<PathBuf>,

    #[arg(long, short, value_name = "FILE", help = "Results CSV (truncated)")]
    output: Option<PathBuf>,

    #[arg(long, help = "Seed for reproducible table contents")]
    seed: Option<u64>,

    #[arg(long, help = "Disable column statistics in written files")]
    no_statistics: bool,
}

impl RunCmd {
    fn resolve(self) -> Result<SweepConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::load(path)?,
            None => SweepConfig::default(),
        };
        if let Some(chunk_sizes) = self.chunk_sizes {
            config.chunk_sizes = chunk_sizes;
        }
        if let Some(rows) = self.rows {
            config.row_counts = rows;
        }
        if let Some(columns) = self.columns {
            config.column_counts = columns;
        }
        if let Some(width) = self.projection_size {
            config.projection = (0..width).collect();
        }
        if let Some(artifact) = self.artifact {
            config.artifact_path = artifact;
        }
        if let Some(output) = self.output {
            config.results_path = output;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_statistics {
            config.write_statistics = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Run(cmd) => {
            let config = cmd.resolve()?;
            let store = ParquetStore::new().with_statistics(config.write_statistics);
            let mut ctx = match config.seed {
                Some(seed) => BenchmarkContext::with_seed(store, &config.artifact_path, seed),
                None => BenchmarkContext::new(store, &config.artifact_path),
            };
            let projection = config.projection();
            let mut reporter = Reporter::create(&config.results_path, projection.len())?;
            let summary = drive(&mut ctx, &config.axes(), &projection, &mut reporter)?;
            eprintln!(
                "{} records written to {}",
                summary.records,
                config.results_path.display()
            );
        }
        Command::Summary {
            path,
            projection_size,
        } => {
            let rows = summary::load_results(&path)?;
            let groups = summary::group_normalized(&rows, projection_size);
            print!("{}", summary::render(&groups));
        }
    }
    Ok(())
}
