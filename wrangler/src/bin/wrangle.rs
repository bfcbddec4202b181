//! Listings wrangler command-line driver.
//!
//! Cleans one listings file, prints the per-stage row counts and optionally
//! writes the clean table as CSV.
//!
//! # Usage
//!
//! ```bash
//! wrangle data/seoul_apartments.csv --output data/train.csv
//! wrangle data/seoul_apartments.txt --config wrangler.toml --report-json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use seoul_wrangler::io::ListingLoader;
use seoul_wrangler::{WranglePipeline, WranglerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "wrangle",
    version,
    about = "Clean Seoul apartment listings for sale-price modelling"
)]
struct Args {
    /// Delimited listings file (tab-separated for .tsv, otherwise comma-separated)
    input: PathBuf,

    /// Write the clean table to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    report_json: bool,
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WranglerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WranglerConfig::default(),
    };

    let pipeline = WranglePipeline::with_config(config);
    let outcome = pipeline
        .process(&args.input)
        .with_context(|| format!("Failed to wrangle {}", args.input.display()))?;

    if args.report_json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        let report = &outcome.report;
        println!("loaded rows:   {}", report.loaded_rows);
        for (stage, dropped) in report.stage_drops() {
            println!("  - {:<20} {}", stage, dropped);
        }
        println!("retained rows: {}", report.retained_rows());
        println!("columns:       {}", report.output_columns.join(", "));
        if let Some(checksum) = &report.source_checksum {
            println!("source sha256: {}", checksum);
        }
    }

    for error in &outcome.validation.errors {
        warn!("{}", error);
    }

    if let Some(output) = &args.output {
        let mut df = outcome.table.into_dataframe();
        ListingLoader::write_csv(&mut df, output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote {} rows to {}", df.height(), output.display());
    }

    Ok(())
}
