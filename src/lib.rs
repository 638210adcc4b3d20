//! Export Hymnal Browser usage statistics to CSV.
//!
//! Accepts either a MongoDB export (`PACKAGE.hymnal.DATA`, numbers wrapped
//! as `{"$numberInt": ..}` / `{"$numberDouble": ..}`) or a raw Hymnal
//! Browser dump (`DATA` holding bare numeric triples).

pub mod config;
pub mod document;
pub mod error;
pub mod mapper;
pub mod timestamp;
pub mod writer;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

pub use config::Config;
pub use error::ExportError;
pub use mapper::HymnData;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub output: PathBuf,
}

/// Read, convert and write one document. Nothing is written unless the whole
/// input converts.
pub fn run(config: &Config) -> Result<Summary> {
    if !config.input.exists() {
        return Err(ExportError::MissingInput(config.input.clone()).into());
    }

    let text = fs::read_to_string(&config.input)
        .with_context(|| format!("Cannot read input file: {}", config.input.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("JSON parse error in {}", config.input.display()))?;

    let entries = document::load_hymns(document, config.raw)?;
    let mut records = mapper::map_hymns(entries);
    writer::dump_to_csv(&mut records, &config.output, config.sort)?;

    info!(records = records.len(), output = %config.output.display(), "export complete");

    Ok(Summary {
        records: records.len(),
        output: config.output.clone(),
    })
}
