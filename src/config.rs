use std::path::PathBuf;

/// Settings for a single conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the exported JSON document.
    pub input: PathBuf,
    /// Destination CSV file. Replaced if it already exists.
    pub output: PathBuf,
    /// Sort rows by hymn id before writing.
    pub sort: bool,
    /// Input is a raw Hymnal Browser dump rather than a MongoDB export.
    pub raw: bool,
}

impl Config {
    pub const DEFAULT_OUTPUT: &'static str = "output.csv";

    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
            sort: true,
            raw: false,
        }
    }
}
