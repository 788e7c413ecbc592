use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the four simulated data-holding sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Cleveland,
    Hungary,
    Switzerland,
    LongBeach,
}

impl Site {
    pub const ALL: [Site; 4] = [
        Site::Cleveland,
        Site::Hungary,
        Site::Switzerland,
        Site::LongBeach,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Site::Cleveland => "Cleveland Clinic",
            Site::Hungary => "Hungarian Inst. of Cardiology",
            Site::Switzerland => "Univ. Hospitals Zurich and Basel",
            Site::LongBeach => "V.A. Medical Center",
        }
    }

    /// Name of the processed data file inside the extracted archive.
    pub fn data_file(&self) -> &'static str {
        match self {
            Site::Cleveland => "processed.cleveland.data",
            Site::Hungary => "processed.hungarian.data",
            Site::Switzerland => "processed.switzerland.data",
            Site::LongBeach => "processed.va.data",
        }
    }

    /// Filesystem-safe name: lowercase, dots dropped, spaces as underscores.
    pub fn slug(&self) -> String {
        slugify(self.display_name())
    }

    /// Resolve a site from its display name or slug (case-insensitive).
    pub fn from_name(name: &str) -> Result<Site, Error> {
        let wanted = name.trim();
        Site::ALL
            .into_iter()
            .find(|site| {
                site.display_name().eq_ignore_ascii_case(wanted)
                    || site.slug() == slugify(wanted)
            })
            .ok_or_else(|| Error::Validation(format!("unknown data site '{name}'")))
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Site {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Site::from_name(value)
    }
}

fn slugify(name: &str) -> String {
    name.replace('.', "").replace(' ', "_").to_lowercase()
}
