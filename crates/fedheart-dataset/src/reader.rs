use std::io::Read;

use tracing::debug;

use fedheart_core::{Column, ColumnKind, Dataset, Value};

use crate::errors::DatasetError;
use crate::options::LoadOptions;

const MISSING_MARKER: &str = "?";

/// Read a delimited numeric table into a dataset.
///
/// Every field is coerced to a number; `?`, empty and unparsable fields
/// become missing. A column is stored as integers only when it has no
/// missing cells and every value is integral, otherwise as floats.
pub fn read_dataset<R: Read>(input: R, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let expected = options.columns.len();
    let mut cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); expected];

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != expected {
            return Err(DatasetError::FieldCount {
                row,
                found: record.len(),
                expected,
            });
        }
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(parse_cell(field));
        }
    }

    let columns: Vec<Column> = options
        .columns
        .iter()
        .zip(cells)
        .map(|(name, values)| build_column(name, values))
        .collect();

    let dataset = Dataset::new(columns)?;
    debug!(
        rows = dataset.row_count(),
        columns = expected,
        "reference dataset parsed"
    );
    Ok(dataset)
}

fn parse_cell(field: &str) -> Option<f64> {
    if field.is_empty() || field == MISSING_MARKER {
        return None;
    }
    field.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn build_column(name: &str, values: Vec<Option<f64>>) -> Column {
    let integral = values.iter().all(|value| {
        value.is_some_and(|number| {
            number.fract() == 0.0 && number >= i64::MIN as f64 && number <= i64::MAX as f64
        })
    });

    if integral {
        let values = values
            .into_iter()
            .map(|value| value.map_or(Value::Missing, |number| Value::Int(number as i64)))
            .collect();
        return Column::new(name, ColumnKind::Int, values);
    }

    let values = values
        .into_iter()
        .map(|value| value.map_or(Value::Missing, Value::Float))
        .collect();
    Column::new(name, ColumnKind::Float, values)
}
