use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::mapper::HymnData;

pub const HEADERS: [&str; 4] = ["id", "queries", "launches", "lastAccessed"];

/// Sort, render and write `records` to `path`, replacing whatever was there.
pub fn dump_to_csv(records: &mut [HymnData], path: &Path, sort: bool) -> Result<()> {
    if sort {
        sort_records(records);
    }

    let bytes = to_csv(records)?;
    debug!(rows = records.len(), bytes = bytes.len(), path = %path.display(), "writing csv");

    fs::write(path, bytes)
        .with_context(|| format!("Cannot write output file: {}", path.display()))
}

pub fn sort_records(records: &mut [HymnData]) {
    records.sort_by(|a, b| locale_cmp(&a.id, &b.id));
}

/// Dictionary-style ordering: punctuation and spaces ahead of digits ahead of
/// letters, case-insensitive first, then lowercase ahead of uppercase, then
/// raw bytes.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = collation_key(a).cmp(collation_key(b));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(|c| {
        let class = if c.is_numeric() {
            1
        } else if c.is_alphanumeric() {
            2
        } else {
            0
        };
        (class, c)
    })
}

/// Header line, then the records joined by newlines. Only the header is
/// newline-terminated when there are no records.
pub fn to_csv(records: &[HymnData]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }

    let mut bytes = wtr
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Cannot flush CSV buffer")?;

    if !records.is_empty() && bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}
