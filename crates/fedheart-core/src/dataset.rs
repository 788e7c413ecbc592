use crate::error::{Error, Result};
use crate::profile::MissingnessProfile;
use crate::validation::validate_dataset;
use crate::value::{ColumnKind, Value};

/// A named column of cells sharing one storage kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_missing()).count()
    }

    /// Convert an integer column to floats; no-op for float columns.
    pub fn widen(&mut self) {
        if self.kind == ColumnKind::Int {
            self.kind = ColumnKind::Float;
            for value in &mut self.values {
                *value = value.widen();
            }
        }
    }
}

/// Tabular data stored column-wise over a fixed, ordered schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, checking names, lengths and value kinds.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let dataset = Self { columns };
        validate_dataset(&dataset)?;
        Ok(dataset)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|column| column.values[index]).collect())
    }

    /// Iterate rows in order; each row lists values in schema order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count()).map(move |index| {
            self.columns
                .iter()
                .map(|column| column.values[index])
                .collect()
        })
    }

    pub fn missingness(&self) -> MissingnessProfile {
        MissingnessProfile::from_dataset(self)
    }

    /// Build a dataset from row-major records against a column schema.
    pub fn from_rows(schema: &[(&str, ColumnKind)], rows: &[Vec<Value>]) -> Result<Self> {
        let mut columns: Vec<Column> = schema
            .iter()
            .map(|(name, kind)| Column::new(*name, *kind, Vec::with_capacity(rows.len())))
            .collect();

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidDataset(format!(
                    "row {index} has {} values, expected {}",
                    row.len(),
                    columns.len()
                )));
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(*value);
            }
        }

        Self::new(columns)
    }
}
