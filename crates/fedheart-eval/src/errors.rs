use thiserror::Error;

/// Errors emitted by the evaluation engine.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("evaluation failed with {0} violation(s)")]
    Violations(u64),
    #[error("core error: {0}")]
    Core(#[from] fedheart_core::Error),
}
