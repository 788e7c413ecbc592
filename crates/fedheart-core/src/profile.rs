use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Per-feature missing-value counts observed in a reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingnessProfile {
    pub row_count: usize,
    pub features: Vec<FeatureMissing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMissing {
    pub feature: String,
    pub missing: usize,
}

impl MissingnessProfile {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            row_count: dataset.row_count(),
            features: dataset
                .columns()
                .iter()
                .map(|column| FeatureMissing {
                    feature: column.name.clone(),
                    missing: column.missing_count(),
                })
                .collect(),
        }
    }

    pub fn missing_count(&self, feature: &str) -> Option<usize> {
        self.features
            .iter()
            .find(|entry| entry.feature == feature)
            .map(|entry| entry.missing)
    }

    pub fn missing_rate(&self, feature: &str) -> Option<f64> {
        let missing = self.missing_count(feature)?;
        if self.row_count == 0 {
            return Some(0.0);
        }
        Some(missing as f64 / self.row_count as f64)
    }

    /// Missing count a dataset of `rows` rows should carry for `feature`.
    pub fn expected_missing(&self, feature: &str, rows: usize) -> Option<usize> {
        let missing = self.missing_count(feature)?;
        Some(scale_missing(missing, self.row_count, rows))
    }
}

/// Scale a reference missing count to a new row count:
/// `round(missing * rows / reference_rows)`, ties to even.
pub fn scale_missing(missing: usize, reference_rows: usize, rows: usize) -> usize {
    if missing == 0 || reference_rows == 0 {
        return 0;
    }
    let scaled = (missing as f64 * rows as f64) / reference_rows as f64;
    scaled.round_ties_even() as usize
}
