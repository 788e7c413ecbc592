//! Reference dataset sources for fedheart.
//!
//! Reads the processed UCI heart-disease files of each data site and
//! normalizes every cell to a number, with unknown markers as missing.

pub mod errors;
pub mod options;
pub mod reader;
pub mod source;

pub use errors::DatasetError;
pub use options::LoadOptions;
pub use reader::read_dataset;
pub use source::{DirectorySource, ReferenceSource};
