use serde::{Deserialize, Serialize};

use fedheart_generate::GenerateOptions;

/// Options for dataset evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateOptions {
    /// Fail on domain or missingness violations.
    pub strict: bool,
    /// Limit the number of examples kept per column.
    pub max_examples: usize,
    /// Row bounds the dataset was generated with.
    pub min_rows: usize,
    pub max_rows: usize,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        let generate = GenerateOptions::default();
        Self {
            strict: false,
            max_examples: 5,
            min_rows: generate.min_rows,
            max_rows: generate.max_rows,
        }
    }
}

impl From<&GenerateOptions> for EvaluateOptions {
    fn from(options: &GenerateOptions) -> Self {
        Self {
            min_rows: options.min_rows,
            max_rows: options.max_rows,
            ..Self::default()
        }
    }
}

/// Structured violation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub column: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}
