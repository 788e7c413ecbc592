use crate::metrics::MetricsReport;

/// Render a deterministic markdown report from metrics.
pub fn render_report(metrics: &MetricsReport, title: &str, max_examples: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# {title}"));
    lines.push(String::new());
    lines.push("## Row count".to_string());
    lines.push(format!("- rows_found: {}", metrics.rows.rows_found));
    lines.push(format!("- reference_rows: {}", metrics.rows.reference_rows));
    lines.push(format!(
        "- bounds: [{}, {}) {}",
        metrics.rows.min_rows,
        metrics.rows.max_rows,
        if metrics.rows.within_bounds { "ok" } else { "VIOLATED" }
    ));
    lines.push(String::new());

    lines.push("## Columns".to_string());
    lines.push(
        "| column | kind | domain_violations | missing_ref | missing_expected | missing_found |"
            .to_string(),
    );
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for column in &metrics.columns {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            column.column,
            column.kind,
            column.domain_violations,
            column.reference_missing,
            column.missing_expected,
            column.missing_found
        ));
    }
    lines.push(String::new());

    if !metrics.violations.is_empty() {
        lines.push("## Top violations".to_string());
        for violation in metrics.violations.iter().take(max_examples) {
            let row = violation
                .row_index
                .map(|row| format!(" row {row}"))
                .unwrap_or_default();
            let example = violation
                .example
                .as_ref()
                .map(|value| format!(" example={value}"))
                .unwrap_or_default();
            lines.push(format!(
                "- {} {}{}: {}{}",
                violation.code, violation.column, row, violation.message, example
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
