//! # hanzidb-convert - Hanzi Dataset Converter
//!
//! Reads a character CSV, folds traditional and alternate forms into one sorted
//! variant list per character, and writes an enhanced CSV plus a sparse JSON
//! array for the application.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Write JSON and a separate normalized CSV
//! hanzidb-convert --input source.csv --output-json data/hanzidb.json --output-csv data/hanzidb_enhanced.csv
//!
//! # Normalize the source CSV in place
//! hanzidb-convert --input data/hanzidb.csv --output-json data/hanzidb.json
//!
//! # Show stage progress on stderr
//! RUST_LOG=info hanzidb-convert --input source.csv --output-json data/hanzidb.json
//! ```

use anyhow::Result;
use clap::Parser;
use hanzidb_core::ConvertSpec;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod pipeline;

#[derive(Parser, Debug)]
#[clap(
    name = "hanzidb-convert",
    about = "Convert a Hanzi CSV into enhanced CSV and JSON outputs"
)]
struct Args {
    /// Source CSV path
    #[arg(long)]
    input: PathBuf,

    /// Output JSON path
    #[arg(long)]
    output_json: PathBuf,

    /// Output normalized CSV path (defaults to --input)
    #[arg(long)]
    output_csv: Option<PathBuf>,
}

impl From<Args> for ConvertSpec {
    fn from(args: Args) -> Self {
        ConvertSpec::new(args.input, args.output_json, args.output_csv)
    }
}

fn main() -> Result<()> {
    // stdout carries only the summary lines
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let spec = ConvertSpec::from(Args::parse());
    let summary = pipeline::run(&spec)?;
    info!("hsk levels: {}", summary.hsk);
    debug!("skipped {} rows with blank character", summary.skipped);

    println!("Wrote {} rows to {}", summary.json_rows, spec.output_json.display());
    println!("Wrote {} rows to {}", summary.csv_rows, spec.csv_target().display());
    Ok(())
}
