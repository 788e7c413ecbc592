use tracing::{info, warn};

use fedheart_core::{Column, Dataset, Domain, DomainRegistry, MissingnessProfile};

use crate::errors::EvalError;
use crate::metrics::{ColumnMetrics, METRICS_VERSION, MetricsReport, RowMetrics};
use crate::model::{EvaluateOptions, Violation};

/// Evaluate a mock dataset against the registry domains and the reference
/// missingness profile it was generated from.
pub fn evaluate(
    mock: &Dataset,
    reference: &MissingnessProfile,
    registry: &DomainRegistry,
    options: &EvaluateOptions,
) -> Result<MetricsReport, EvalError> {
    let rows = mock.row_count();
    let row_metrics = RowMetrics {
        rows_found: rows as u64,
        reference_rows: reference.row_count as u64,
        min_rows: options.min_rows as u64,
        max_rows: options.max_rows as u64,
        within_bounds: (options.min_rows..options.max_rows).contains(&rows),
    };

    let mut violations = Vec::new();
    if !row_metrics.within_bounds {
        violations.push(Violation {
            code: "row_count".to_string(),
            column: String::new(),
            message: format!(
                "{rows} rows outside [{}, {})",
                options.min_rows, options.max_rows
            ),
            row_index: None,
            example: None,
        });
    }

    let mut columns = Vec::with_capacity(mock.columns().len());
    for column in mock.columns() {
        let domain = registry.domain(&column.name)?;
        let reference_missing = reference.missing_count(&column.name).ok_or_else(|| {
            EvalError::InvalidDataset(format!(
                "column '{}' is absent from the reference profile",
                column.name
            ))
        })?;
        columns.push(evaluate_column(
            column,
            domain,
            reference,
            reference_missing,
            rows,
            options,
            &mut violations,
        ));
    }

    let report = MetricsReport {
        metrics_version: METRICS_VERSION.to_string(),
        rows: row_metrics,
        columns,
        violations,
    };

    let violation_count = report.violation_count();
    if violation_count > 0 {
        warn!(violations = violation_count, rows, "mock dataset has violations");
        if options.strict {
            return Err(EvalError::Violations(violation_count));
        }
    } else {
        info!(rows, columns = report.columns.len(), "mock dataset evaluated");
    }

    Ok(report)
}

fn evaluate_column(
    column: &Column,
    domain: &Domain,
    reference: &MissingnessProfile,
    reference_missing: usize,
    rows: usize,
    options: &EvaluateOptions,
    violations: &mut Vec<Violation>,
) -> ColumnMetrics {
    let mut domain_checked = 0_u64;
    let mut domain_violations = 0_u64;
    let mut examples = 0_usize;

    for (row_index, value) in column.values.iter().enumerate() {
        if value.is_missing() {
            continue;
        }
        domain_checked += 1;
        if !domain.contains(value) {
            domain_violations += 1;
            if examples < options.max_examples {
                examples += 1;
                violations.push(Violation {
                    code: "domain".to_string(),
                    column: column.name.clone(),
                    message: "value outside registered domain".to_string(),
                    row_index: Some(row_index as u64),
                    example: Some(value.to_string()),
                });
            }
        }
    }

    let missing_found = column.missing_count();
    let missing_expected = reference
        .expected_missing(&column.name, rows)
        .unwrap_or_default();
    let missing_within_expected = missing_found <= missing_expected;
    if !missing_within_expected {
        violations.push(Violation {
            code: "missing_rate".to_string(),
            column: column.name.clone(),
            message: format!("{missing_found} missing values, expected at most {missing_expected}"),
            row_index: None,
            example: None,
        });
    }

    ColumnMetrics {
        column: column.name.clone(),
        kind: column.kind.as_str().to_string(),
        domain_checked,
        domain_violations,
        reference_missing: reference_missing as u64,
        reference_missing_rate: reference.missing_rate(&column.name).unwrap_or_default(),
        missing_found: missing_found as u64,
        missing_rate: rate(missing_found, rows),
        missing_expected: missing_expected as u64,
        missing_within_expected,
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
