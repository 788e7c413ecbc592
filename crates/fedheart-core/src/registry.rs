use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Domain, Feature};
use crate::error::{Error, Result};
use crate::heart;
use crate::value::Value;

/// Ordered mapping from feature name to its domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DomainRegistry {
    pub features: Vec<Feature>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domains of the UCI heart-disease features and the `num` target.
    pub fn heart_disease() -> Self {
        let features = vec![
            Feature::new("age", Domain::int_range(1, 100)),
            Feature::new("sex", Domain::int_range(0, 2)),
            Feature::new("cp", Domain::int_range(1, 5)),
            Feature::new("trestbps", Domain::int_range(60, 210)),
            Feature::new("chol", Domain::int_range(50, 600)),
            Feature::new("fbs", Domain::int_range(0, 2)),
            Feature::new("restecg", Domain::int_range(0, 3)),
            Feature::new("thalach", Domain::int_range(60, 210)),
            Feature::new("exang", Domain::int_range(0, 2)),
            Feature::new("oldpeak", Domain::float_step(-2.0, 5.0, 0.1)),
            Feature::new("slope", Domain::int_range(1, 4)),
            Feature::new("ca", Domain::int_range(0, 4)),
            Feature::new(
                "thal",
                Domain::values([Value::Int(3), Value::Int(6), Value::Int(7)]),
            ),
            Feature::new(heart::TARGET, Domain::int_range(0, 5)),
        ];
        Self { features }
    }

    /// Add a feature, rejecting duplicates and invalid domains.
    pub fn register(&mut self, name: impl Into<String>, domain: Domain) -> Result<()> {
        let name = name.into();
        domain.validate(&name)?;
        if self.get(&name).is_some() {
            return Err(Error::Configuration(format!(
                "feature '{name}' is already registered"
            )));
        }
        self.features.push(Feature { name, domain });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.features
            .iter()
            .find(|feature| feature.name == name)
            .map(|feature| &feature.domain)
    }

    /// Look up a feature's domain, failing when it was never registered.
    pub fn domain(&self, name: &str) -> Result<&Domain> {
        self.get(name).ok_or_else(|| {
            Error::Configuration(format!("feature '{name}' has no registered domain"))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|feature| feature.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for feature in &self.features {
            if !seen.insert(feature.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "duplicate feature name: {}",
                    feature.name
                )));
            }
            feature.domain.validate(&feature.name)?;
        }
        Ok(())
    }

    /// Parse and validate a registry from its TOML representation.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let registry: DomainRegistry = toml::from_str(input)
            .map_err(|err| Error::Configuration(format!("invalid domain registry: {err}")))?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| Error::Configuration(format!("cannot encode domain registry: {err}")))
    }
}
