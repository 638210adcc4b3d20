use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hymnal_csv::{Config, run};
use tracing_subscriber::EnvFilter;

/// A CSV exporter for MSDAC Systems Hymnal Browser data.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A CSV exporter for Hymnal Browser data",
    long_about = "A CSV exporter for MSDAC Systems Hymnal Browser data.\nThe output file will be in CSV format."
)]
struct Cli {
    /// Path to input file. Example: data.json
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Path to output file. Example: data.csv
    #[arg(short, long, value_name = "FILE", default_value = Config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Indicate the input file is a raw JSON from Hymnal Browser
    #[arg(short, long)]
    raw: bool,

    /// Sort the data by id (default)
    #[arg(short, long, overrides_with = "no_sort")]
    sort: bool,

    /// Keep hymns in document order
    #[arg(long, overrides_with = "sort")]
    no_sort: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input: cli.input,
            output: cli.output,
            sort: !cli.no_sort,
            raw: cli.raw,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI flags
    let config = Config::from(Cli::parse());
    let summary = run(&config)?;

    println!(
        "Exported {} hymns from {} to {}.",
        summary.records,
        config.input.display(),
        summary.output.display()
    );
    Ok(())
}
