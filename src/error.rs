use std::path::PathBuf;

use thiserror::Error;

/// Problems with the input the operator handed us. Anything else (I/O, JSON
/// syntax, malformed hymn entries) travels as a plain `anyhow::Error`.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File '{}' does not exist.", .0.display())]
    MissingInput(PathBuf),
    #[error(
        "Invalid input file. PACKAGE is not found. If the input file is not a MongoDB export, use the --raw flag."
    )]
    MissingPackage,
    #[error("Invalid raw input file. No DATA key found.")]
    MissingData,
}
