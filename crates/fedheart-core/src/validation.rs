use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::registry::DomainRegistry;

/// Validate internal consistency of a dataset.
///
/// This checks:
/// - duplicate column names
/// - all columns have the same length
/// - every present value matches its column kind
pub fn validate_dataset(dataset: &Dataset) -> Result<()> {
    let mut names = BTreeSet::new();
    let expected_rows = dataset.row_count();

    for column in dataset.columns() {
        if !names.insert(column.name.as_str()) {
            return Err(Error::InvalidDataset(format!(
                "duplicate column name: {}",
                column.name
            )));
        }

        if column.len() != expected_rows {
            return Err(Error::InvalidDataset(format!(
                "column '{}' has {} rows, expected {}",
                column.name,
                column.len(),
                expected_rows
            )));
        }

        if let Some((row, value)) = column
            .values
            .iter()
            .enumerate()
            .find(|(_, value)| value.kind().is_some_and(|kind| kind != column.kind))
        {
            return Err(Error::InvalidDataset(format!(
                "column '{}' is {} but row {row} holds {value}",
                column.name,
                column.kind.as_str()
            )));
        }
    }

    Ok(())
}

/// Ensure every column of the dataset has a registered domain.
pub fn validate_coverage(dataset: &Dataset, registry: &DomainRegistry) -> Result<()> {
    for name in dataset.feature_names() {
        registry.domain(name)?;
    }
    Ok(())
}
