//! Normalize a numeric CSV dataset for symbolic regression.
//!
//! Writes the min-max normalized dataset (target scaled to [0, 1]) and a
//! bounds file that maps model outputs back to the original units.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use scaled_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Degenerate {
    /// Fail when a column has min == max
    Error,
    /// Write NaN/Infinity for columns with min == max
    Propagate,
}

impl From<Degenerate> for DegeneratePolicy {
    fn from(value: Degenerate) -> Self {
        match value {
            Degenerate::Error => DegeneratePolicy::Error,
            Degenerate::Propagate => DegeneratePolicy::Propagate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "scale-dataset", version, about = "Min-max normalize a CSV dataset")]
struct Args {
    /// Input CSV, one fitness case per line
    input: PathBuf,

    /// Output path for the normalized dataset
    output: PathBuf,

    /// Output path for the bounds file
    bounds: PathBuf,

    /// Input has a header row
    #[arg(long)]
    header: bool,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Zero-based target column (default: last column)
    #[arg(short, long)]
    target_column: Option<usize>,

    /// Handling of columns whose min equals max
    #[arg(long, value_enum, default_value_t = Degenerate::Error)]
    degenerate: Degenerate,

    /// Write outputs in place instead of via temporary files
    #[arg(long)]
    no_atomic: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<()> {
    if !args.delimiter.is_ascii() {
        return Err(ScalingError::Parse {
            line: 0,
            message: format!("delimiter '{}' is not a single-byte character", args.delimiter),
        });
    }

    let mut options = CsvOptions::new()
        .with_headers(args.header)
        .with_delimiter(args.delimiter as u8);
    if let Some(column) = args.target_column {
        options = options.with_target_column(column);
    }
    let config = ScalingConfig::new()
        .with_degenerate_policy(args.degenerate.into())
        .with_atomic_writes(!args.no_atomic);

    let data = load_csv(&args.input, &options, &config)?;
    tracing::debug!(
        mean = ?data.target_mean(),
        min = ?data.target_min(),
        max = ?data.target_max(),
        "target statistics"
    );
    data.normalize_values(&args.output, &args.bounds)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
