use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single cell of a tabular dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            Value::Missing => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Widen an integer cell to its floating representation.
    pub fn widen(self) -> Value {
        match self {
            Value::Int(value) => Value::Float(value as f64),
            other => other,
        }
    }

    /// The column kind this value belongs to, `None` for missing cells.
    pub fn kind(&self) -> Option<ColumnKind> {
        match self {
            Value::Int(_) => Some(ColumnKind::Int),
            Value::Float(_) => Some(ColumnKind::Float),
            Value::Missing => None,
        }
    }

    /// Render as a CSV field. Missing cells become empty fields and floats
    /// always carry a decimal point so widened columns stay recognisable.
    pub fn to_csv(&self) -> String {
        match self {
            Value::Missing => String::new(),
            Value::Int(value) => value.to_string(),
            Value::Float(value) => format_float(*value),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str("NaN"),
            other => f.write_str(&other.to_csv()),
        }
    }
}

/// Storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Int,
    Float,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Int => "int",
            ColumnKind::Float => "float",
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_a_decimal_point() {
        assert_eq!(Value::Float(63.0).to_csv(), "63.0");
        assert_eq!(Value::Float(-1.5).to_csv(), "-1.5");
        assert_eq!(Value::Int(63).to_csv(), "63");
        assert_eq!(Value::Missing.to_csv(), "");
    }

    #[test]
    fn widen_only_touches_integers() {
        assert_eq!(Value::Int(3).widen(), Value::Float(3.0));
        assert_eq!(Value::Float(0.5).widen(), Value::Float(0.5));
        assert_eq!(Value::Missing.widen(), Value::Missing);
    }
}
