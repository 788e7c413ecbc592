use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use fedheart_core::{Dataset, Site, heart};

use crate::errors::DatasetError;
use crate::options::LoadOptions;
use crate::reader::read_dataset;

/// Trait implemented by sources that can provide a site's reference data.
pub trait ReferenceSource {
    /// Returns the source identifier (e.g. `directory`).
    fn kind(&self) -> &'static str;

    /// Load the reference dataset held by `site`.
    fn load(&self, site: Site) -> Result<Dataset, DatasetError>;
}

/// Source reading the extracted archive from a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    options: LoadOptions,
}

impl DirectorySource {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Source with default options rooted at `root`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self::new(LoadOptions {
            root: root.into(),
            ..LoadOptions::default()
        })
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    pub fn site_path(&self, site: Site) -> PathBuf {
        self.options.root.join(site.data_file())
    }

    /// Whether the site's data file is present on disk.
    pub fn is_available(&self, site: Site) -> bool {
        self.site_path(site).is_file()
    }
}

impl ReferenceSource for DirectorySource {
    fn kind(&self) -> &'static str {
        "directory"
    }

    fn load(&self, site: Site) -> Result<Dataset, DatasetError> {
        let path = self.site_path(site);
        if !path.is_file() {
            return Err(DatasetError::NotFound {
                path,
                url: heart::DATA_URL,
            });
        }

        let file = File::open(&path)?;
        let dataset = read_dataset(BufReader::new(file), &self.options)?;
        info!(
            source = self.kind(),
            site = %site,
            path = %path.display(),
            rows = dataset.row_count(),
            "reference dataset loaded"
        );
        Ok(dataset)
    }
}
