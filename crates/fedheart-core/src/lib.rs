//! Core contracts and helpers for fedheart.
//!
//! This crate defines the tabular data model, feature domains, the site
//! catalog, and validation helpers shared by the loader, the mock-data
//! generator, and the CLI.

pub mod dataset;
pub mod domain;
pub mod error;
pub mod heart;
pub mod profile;
pub mod registry;
pub mod seed;
pub mod site;
pub mod validation;
pub mod value;

pub use dataset::{Column, Dataset};
pub use domain::{Domain, Feature};
pub use error::{Error, Result};
pub use profile::{FeatureMissing, MissingnessProfile, scale_missing};
pub use registry::DomainRegistry;
pub use seed::{DEFAULT_SEED, Seed};
pub use site::Site;
pub use validation::{validate_coverage, validate_dataset};
pub use value::{ColumnKind, Value};

/// Current contract version for JSON reports.
pub const REPORT_VERSION: &str = "0.1";
