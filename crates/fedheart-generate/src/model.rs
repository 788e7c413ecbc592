use serde::{Deserialize, Serialize};

use fedheart_core::{ColumnKind, REPORT_VERSION};

use crate::errors::GenerationError;

/// How row positions for missing values are picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSampling {
    /// Positions drawn independently; repeats collapse, so the realized
    /// missing count can fall short of the requested one.
    #[default]
    WithReplacement,
    /// Distinct positions; the realized count always equals the request.
    WithoutReplacement,
}

/// Options for the mock data generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Smallest row count that may be drawn (inclusive).
    pub min_rows: usize,
    /// Row count upper bound (exclusive).
    pub max_rows: usize,
    /// Position sampling for missing-value injection.
    pub sampling: MissingSampling,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            min_rows: 50,
            max_rows: 300,
            sampling: MissingSampling::WithReplacement,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.min_rows == 0 {
            return Err(GenerationError::Validation(
                "min_rows must be at least 1".to_string(),
            ));
        }
        if self.min_rows >= self.max_rows {
            return Err(GenerationError::Validation(format!(
                "row bounds must satisfy min_rows < max_rows (got {}..{})",
                self.min_rows, self.max_rows
            )));
        }
        Ok(())
    }
}

/// Per-feature outcome of a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    pub feature: String,
    pub kind: ColumnKind,
    pub reference_missing: usize,
    pub missing_requested: usize,
    pub missing_realized: usize,
    pub widened: bool,
}

/// Report for a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub report_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub reference_rows: usize,
    pub rows: usize,
    pub sampling: MissingSampling,
    pub features: Vec<FeatureReport>,
}

impl GenerationReport {
    pub fn new(
        seed: Option<u64>,
        reference_rows: usize,
        rows: usize,
        sampling: MissingSampling,
    ) -> Self {
        Self {
            report_version: REPORT_VERSION.to_string(),
            seed,
            reference_rows,
            rows,
            sampling,
            features: Vec::new(),
        }
    }

    pub fn feature(&self, name: &str) -> Option<&FeatureReport> {
        self.features.iter().find(|feature| feature.feature == name)
    }

    pub fn missing_requested_total(&self) -> usize {
        self.features.iter().map(|feature| feature.missing_requested).sum()
    }

    pub fn missing_realized_total(&self) -> usize {
        self.features.iter().map(|feature| feature.missing_realized).sum()
    }

    /// Missing cells lost to repeated positions under replacement sampling.
    pub fn collisions(&self) -> usize {
        self.missing_requested_total()
            .saturating_sub(self.missing_realized_total())
    }
}
