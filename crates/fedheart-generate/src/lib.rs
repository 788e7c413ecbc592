//! Mock data generation for fedheart.
//!
//! Produces synthetic datasets that keep each feature's value domain and
//! proportional missing-value rate from a reference dataset, while
//! resampling every column independently so no real values or cross-column
//! correlations survive.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;

pub use engine::{MockDataGenerator, MockOutput, generate_mock};
pub use errors::GenerationError;
pub use model::{FeatureReport, GenerateOptions, GenerationReport, MissingSampling};
