use std::path::PathBuf;

use fedheart_core::heart;

/// Options that control how reference files are read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory holding the extracted `processed.*.data` files.
    pub root: PathBuf,
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Whether the first record is a header row.
    pub has_headers: bool,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("tmp/data"),
            columns: heart::columns().into_iter().map(str::to_string).collect(),
            has_headers: false,
            delimiter: b',',
        }
    }
}
