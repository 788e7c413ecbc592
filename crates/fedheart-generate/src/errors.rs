use thiserror::Error;

/// Errors emitted by the mock data generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A feature has no registered domain, or a domain is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Seed, options or reference dataset are invalid.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<fedheart_core::Error> for GenerationError {
    fn from(err: fedheart_core::Error) -> Self {
        match err {
            fedheart_core::Error::Configuration(message) => GenerationError::Configuration(message),
            fedheart_core::Error::Validation(message)
            | fedheart_core::Error::InvalidDataset(message) => GenerationError::Validation(message),
        }
    }
}
