use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::{ColumnKind, Value};

const STEP_EPSILON: f64 = 1e-9;
const CONTAINS_TOLERANCE: f64 = 1e-6;
const MAX_STEP_DECIMALS: usize = 12;

/// Permissible values for a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Domain {
    /// Integers in `[low, high)`.
    IntRange { low: i64, high: i64 },
    /// Arithmetic sequence `start, start + step, ...` strictly below `stop`.
    FloatStep { start: f64, stop: f64, step: f64 },
    /// Explicit set of discrete values.
    Values { values: Vec<Value> },
}

impl Domain {
    pub fn int_range(low: i64, high: i64) -> Self {
        Domain::IntRange { low, high }
    }

    pub fn float_step(start: f64, stop: f64, step: f64) -> Self {
        Domain::FloatStep { start, stop, step }
    }

    pub fn values(values: impl IntoIterator<Item = Value>) -> Self {
        Domain::Values {
            values: values.into_iter().collect(),
        }
    }

    /// Check that the domain describes at least one value.
    pub fn validate(&self, feature: &str) -> Result<()> {
        match self {
            Domain::IntRange { low, high } => {
                if low >= high {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': int_range requires low < high (got [{low}, {high}))"
                    )));
                }
                if high.checked_sub(*low).is_none() {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': int_range [{low}, {high}) is too wide"
                    )));
                }
            }
            Domain::FloatStep { start, stop, step } => {
                if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': float_step bounds must be finite"
                    )));
                }
                if *step <= 0.0 {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': float_step requires step > 0 (got {step})"
                    )));
                }
                if start >= stop {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': float_step requires start < stop (got {start}..{stop})"
                    )));
                }
            }
            Domain::Values { values } => {
                if values.is_empty() {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': values domain is empty"
                    )));
                }
                if values.iter().any(Value::is_missing) {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': values domain cannot contain missing values"
                    )));
                }
                if values
                    .iter()
                    .filter_map(Value::as_f64)
                    .any(|value| !value.is_finite())
                {
                    return Err(Error::Configuration(format!(
                        "feature '{feature}': values domain must be finite"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Storage kind of values drawn from this domain.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Domain::IntRange { .. } => ColumnKind::Int,
            Domain::FloatStep { .. } => ColumnKind::Float,
            Domain::Values { values } => {
                if values.iter().all(|value| matches!(value, Value::Int(_))) {
                    ColumnKind::Int
                } else {
                    ColumnKind::Float
                }
            }
        }
    }

    /// Number of distinct values in the domain.
    pub fn len(&self) -> usize {
        match self {
            Domain::IntRange { low, high } => {
                high.checked_sub(*low)
                    .and_then(|width| usize::try_from(width).ok())
                    .unwrap_or(0)
            }
            Domain::FloatStep { start, stop, step } => {
                if *step <= 0.0 || start >= stop {
                    return 0;
                }
                ((stop - start) / step - STEP_EPSILON).ceil().max(0.0) as usize
            }
            Domain::Values { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th value of the domain, in declaration order.
    pub fn value_at(&self, index: usize) -> Option<Value> {
        if index >= self.len() {
            return None;
        }
        match self {
            Domain::IntRange { low, .. } => Some(Value::Int(low + index as i64)),
            Domain::FloatStep { start, step, .. } => {
                let raw = start + index as f64 * step;
                Some(Value::Float(round_to(raw, step_decimals(*step))))
            }
            Domain::Values { values } => {
                let value = values[index];
                match self.kind() {
                    ColumnKind::Float => Some(value.widen()),
                    ColumnKind::Int => Some(value),
                }
            }
        }
    }

    /// Draw one value uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Value> {
        let len = self.len();
        if len == 0 {
            return Err(Error::Configuration("cannot sample from an empty domain".to_string()));
        }
        let index = rng.random_range(0..len);
        self.value_at(index)
            .ok_or_else(|| Error::Configuration(format!("domain index {index} out of bounds")))
    }

    /// Whether a (non-missing) value belongs to the domain. Integral floats
    /// produced by widening are accepted by integer domains.
    pub fn contains(&self, value: &Value) -> bool {
        let Some(number) = value.as_f64() else {
            return false;
        };
        match self {
            Domain::IntRange { low, high } => {
                number.fract() == 0.0 && number >= *low as f64 && number < *high as f64
            }
            Domain::FloatStep { start, stop, step } => {
                if number < start - CONTAINS_TOLERANCE || number >= *stop - CONTAINS_TOLERANCE {
                    return false;
                }
                let offset = (number - start) / step;
                (offset - offset.round()).abs() < CONTAINS_TOLERANCE * 10.0
            }
            Domain::Values { values } => values
                .iter()
                .filter_map(Value::as_f64)
                .any(|candidate| (candidate - number).abs() < CONTAINS_TOLERANCE),
        }
    }
}

/// A named column bound to its domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Feature {
    pub name: String,
    pub domain: Domain,
}

impl Feature {
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }
}

fn step_decimals(step: f64) -> usize {
    let rendered = step.to_string();
    rendered
        .split_once('.')
        .map(|(_, fraction)| fraction.len().min(MAX_STEP_DECIMALS))
        .unwrap_or(0)
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}
