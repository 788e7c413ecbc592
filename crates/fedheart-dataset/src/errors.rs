use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while loading reference datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("data file {path} not found; extract {url} into the data root first")]
    NotFound { path: PathBuf, url: &'static str },
    #[error("row {row} has {found} fields, expected {expected}")]
    FieldCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("core error: {0}")]
    Core(#[from] fedheart_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
