use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fedheart_core::{DomainRegistry, Seed};
use fedheart_generate::{GenerateOptions, MissingSampling};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("core error: {0}")]
    Core(#[from] fedheart_core::Error),
}

/// Defaults read from an optional `fedheart.toml`; CLI flags win.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the extracted `processed.*.data` files.
    pub data_root: PathBuf,
    /// Directory where run folders are created.
    pub run_dir: PathBuf,
    pub seed: Seed,
    pub min_rows: usize,
    pub max_rows: usize,
    pub sampling: MissingSampling,
    /// Optional TOML domain registry replacing the built-in one.
    pub domains: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let generate = GenerateOptions::default();
        Self {
            data_root: PathBuf::from("tmp/data"),
            run_dir: PathBuf::from("runs"),
            seed: Seed::default(),
            min_rows: generate.min_rows,
            max_rows: generate.max_rows,
            sampling: generate.sampling,
            domains: None,
        }
    }
}

impl Settings {
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            min_rows: self.min_rows,
            max_rows: self.max_rows,
            sampling: self.sampling,
        }
    }
}

/// Load settings from `path`, or defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the domain registry from `path`, or the built-in heart-disease one.
pub fn load_registry(path: Option<&Path>) -> Result<DomainRegistry, SettingsError> {
    let Some(path) = path else {
        return Ok(DomainRegistry::heart_disease());
    };
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DomainRegistry::from_toml_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_seed_is_validated() {
        let settings: Settings = toml::from_str("seed = 7").expect("settings");
        assert_eq!(settings.seed.value(), 7);
        assert_eq!(settings.max_rows, GenerateOptions::default().max_rows);

        let defaults: Settings = toml::from_str("").expect("defaults");
        assert_eq!(defaults.seed, Seed::default());

        let err = toml::from_str::<Settings>("seed = 4294967296").expect_err("out of range");
        assert!(err.to_string().contains("seed must be between"));
    }
}
