use thiserror::Error;

/// Core error type shared across fedheart crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A feature or domain definition is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A caller-supplied value (seed, options, site name) is invalid.
    #[error("validation error: {0}")]
    Validation(String),
    /// The dataset violates internal invariants.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
}

/// Convenience alias for results returned by fedheart crates.
pub type Result<T> = std::result::Result<T, Error>;
