use serde::{Deserialize, Serialize};

use crate::model::Violation;

/// Metrics contract version for mock dataset evaluation.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable metrics for a mock dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics_version: String,
    pub rows: RowMetrics,
    pub columns: Vec<ColumnMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl MetricsReport {
    pub fn column(&self, name: &str) -> Option<&ColumnMetrics> {
        self.columns.iter().find(|column| column.column == name)
    }

    pub fn violation_count(&self) -> u64 {
        let out_of_bounds = u64::from(!self.rows.within_bounds);
        self.columns
            .iter()
            .map(|column| column.domain_violations + u64::from(!column.missing_within_expected))
            .sum::<u64>()
            + out_of_bounds
    }

    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0
    }
}

/// Row count compared with the configured bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowMetrics {
    pub rows_found: u64,
    pub reference_rows: u64,
    pub min_rows: u64,
    pub max_rows: u64,
    pub within_bounds: bool,
}

/// Per-column domain and missingness statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetrics {
    pub column: String,
    pub kind: String,
    pub domain_checked: u64,
    pub domain_violations: u64,
    pub reference_missing: u64,
    pub reference_missing_rate: f64,
    pub missing_found: u64,
    pub missing_rate: f64,
    pub missing_expected: u64,
    /// Found `<=` expected; repeated positions can only lower the count.
    pub missing_within_expected: bool,
}
