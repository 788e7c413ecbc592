use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use fedheart_core::{REPORT_VERSION, Site};
use fedheart_eval::MetricsReport;
use fedheart_generate::output::csv::write_dataset_csv;
use fedheart_generate::{GenerateOptions, MockOutput};

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub data_root: PathBuf,
    pub base_seed: u64,
    pub sites: Vec<SiteSeed>,
    pub options: GenerateOptions,
    pub domains: Option<PathBuf>,
}

/// Seed actually used for one site.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSeed {
    pub site: String,
    pub slug: String,
    pub seed: u64,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub report_version: String,
    pub data_root: String,
    pub base_seed: u64,
    pub sites: Vec<SiteSeed>,
    pub options: GenerateOptions,
    pub domains: Option<String>,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
}

/// Files written for one site's mock dataset.
#[derive(Debug, Clone)]
pub struct SiteArtifacts {
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
    pub metrics_path: PathBuf,
    pub summary_path: PathBuf,
    pub bytes_written: u64,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        report_version: REPORT_VERSION.to_string(),
        data_root: ctx.data_root.display().to_string(),
        base_seed: ctx.base_seed,
        sites: ctx.sites.clone(),
        options: ctx.options.clone(),
        domains: ctx.domains.as_ref().map(|path| path.display().to_string()),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root,
        config_path,
        logs_path,
    })
}

/// Write the mock CSV, generation report, metrics and markdown summary
/// for one site into the run directory.
pub fn write_site_artifacts(
    paths: &RunPaths,
    site: Site,
    output: &MockOutput,
    metrics: &MetricsReport,
    summary: &str,
) -> RegistryResult<SiteArtifacts> {
    let slug = site.slug();
    let csv_path = paths.root.join(format!("{slug}.mock.csv"));
    let report_path = paths.root.join(format!("{slug}.generation_report.json"));
    let metrics_path = paths.root.join(format!("{slug}.metrics.json"));
    let summary_path = paths.root.join(format!("{slug}.report.md"));

    let bytes_written = write_dataset_csv(&csv_path, &output.dataset)
        .map_err(|err| RegistryError::Output(err.into()))?;
    write_json(&report_path, &output.report)?;
    write_json(&metrics_path, metrics)?;
    std::fs::write(&summary_path, summary)?;

    Ok(SiteArtifacts {
        csv_path,
        report_path,
        metrics_path,
        summary_path,
        bytes_written,
    })
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
