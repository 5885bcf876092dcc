use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read station list '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Invalid elevation '{value}' for station on line {line}")]
    InvalidElevation {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Elevation missing for station on line {line}")]
    MissingElevation { line: usize },

    #[error("Invalid block number '{value}' on line {line}")]
    InvalidBlockNumber {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Required field '{field}' missing on line {line}")]
    MissingField { line: usize, field: &'static str },
}
