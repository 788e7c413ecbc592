mod registry;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fedheart_core::{Error as CoreError, Seed, Site};
use fedheart_dataset::{DatasetError, DirectorySource, ReferenceSource};
use fedheart_eval::{EvalError, EvaluateOptions, evaluate, render_report};
use fedheart_generate::{GenerationError, MissingSampling, MockDataGenerator};
use registry::{
    RunContext, SiteSeed, init_console_logging, init_run_logging, start_run, write_site_artifacts,
};
use settings::{Settings, SettingsError, load_registry, load_settings};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fedheart", version, about = "Heart-disease data site utilities")]
struct Cli {
    /// Optional settings file (TOML).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the data sites and whether their files are present.
    Sites(SourceArgs),
    /// Print the missing-value profile of a site's reference data.
    Profile(ProfileArgs),
    /// Print the domain registry as TOML.
    Domains(DomainsArgs),
    /// Generate mock datasets for one or more sites.
    Mock(MockArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Directory with the extracted `processed.*.data` files.
    #[arg(long)]
    data_root: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Site display name or slug.
    #[arg(long)]
    site: String,
}

#[derive(Args, Debug)]
struct DomainsArgs {
    /// Domain registry file to print instead of the built-in one.
    #[arg(long)]
    domains: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SamplingArg {
    WithReplacement,
    WithoutReplacement,
}

impl From<SamplingArg> for MissingSampling {
    fn from(value: SamplingArg) -> Self {
        match value {
            SamplingArg::WithReplacement => MissingSampling::WithReplacement,
            SamplingArg::WithoutReplacement => MissingSampling::WithoutReplacement,
        }
    }
}

#[derive(Args, Debug)]
struct MockArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Site display name or slug; repeat for several. Defaults to all sites.
    #[arg(long = "site")]
    sites: Vec<String>,
    /// Base seed; each site uses a seed derived from it and its slug.
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<Seed>,
    /// Output directory for runs.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Domain registry file (TOML).
    #[arg(long)]
    domains: Option<PathBuf>,
    /// Smallest mock row count (inclusive).
    #[arg(long)]
    min_rows: Option<usize>,
    /// Mock row count upper bound (exclusive).
    #[arg(long)]
    max_rows: Option<usize>,
    /// How missing-value positions are sampled.
    #[arg(long, value_enum)]
    sampling: Option<SamplingArg>,
    /// Fail when a mock dataset violates its domains or missing rates.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Sites(args) => run_sites(args, &settings),
        Command::Profile(args) => run_profile(args, &settings),
        Command::Domains(args) => run_domains(args, &settings),
        Command::Mock(args) => run_mock(args, settings),
    }
}

fn source_for(args: &SourceArgs, settings: &Settings) -> DirectorySource {
    DirectorySource::at(
        args.data_root
            .clone()
            .unwrap_or_else(|| settings.data_root.clone()),
    )
}

fn run_sites(args: SourceArgs, settings: &Settings) -> Result<(), CliError> {
    init_console_logging()?;
    let source = source_for(&args, settings);

    let rule = "=".repeat(65);
    println!("{rule}");
    println!("\n\t{} Data Sites registered.\n", Site::ALL.len());
    for (index, site) in Site::ALL.iter().enumerate() {
        let status = if source.is_available(*site) {
            "available"
        } else {
            "missing"
        };
        println!(
            "{}. {} ({}): {} [{status}]",
            index + 1,
            site.display_name(),
            site.slug(),
            source.site_path(*site).display()
        );
    }
    println!("{rule}");
    Ok(())
}

fn run_profile(args: ProfileArgs, settings: &Settings) -> Result<(), CliError> {
    init_console_logging()?;
    let site = Site::from_name(&args.site)?;
    let dataset = source_for(&args.source, settings).load(site)?;
    let profile = dataset.missingness();
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn run_domains(args: DomainsArgs, settings: &Settings) -> Result<(), CliError> {
    init_console_logging()?;
    let path = args.domains.or_else(|| settings.domains.clone());
    let registry = load_registry(path.as_deref())?;
    print!("{}", registry.to_toml_string()?);
    Ok(())
}

fn run_mock(args: MockArgs, settings: Settings) -> Result<(), CliError> {
    let MockArgs {
        source,
        sites,
        seed,
        run_dir,
        domains,
        min_rows,
        max_rows,
        sampling,
        strict,
    } = args;

    let sites = resolve_sites(&sites)?;
    let base_seed = seed.unwrap_or(settings.seed);
    let domains = domains.or_else(|| settings.domains.clone());
    let registry = load_registry(domains.as_deref())?;

    let mut options = settings.generate_options();
    if let Some(min_rows) = min_rows {
        options.min_rows = min_rows;
    }
    if let Some(max_rows) = max_rows {
        options.max_rows = max_rows;
    }
    if let Some(sampling) = sampling {
        options.sampling = sampling.into();
    }

    let generator = MockDataGenerator::new(registry.clone(), options.clone())?;
    let data_source = source_for(&source, &settings);

    let site_seeds: Vec<(Site, Seed)> = sites
        .iter()
        .map(|site| (*site, base_seed.derive(&site.slug())))
        .collect();

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir: run_dir.unwrap_or_else(|| settings.run_dir.clone()),
        data_root: data_source.root().to_path_buf(),
        base_seed: base_seed.value(),
        sites: site_seeds
            .iter()
            .map(|(site, seed)| SiteSeed {
                site: site.display_name().to_string(),
                slug: site.slug(),
                seed: seed.value(),
            })
            .collect(),
        options: options.clone(),
        domains,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, sites = site_seeds.len());
    tracing::info!(event = "config_written", path = %run_paths.config_path.display());
    let timer = Instant::now();

    let mut eval_options = EvaluateOptions::from(&options);
    eval_options.strict = strict;

    for (site, seed) in site_seeds {
        let reference = data_source.load(site)?;
        let output = generator.generate(&reference, seed)?;
        let metrics = evaluate(
            &output.dataset,
            &reference.missingness(),
            &registry,
            &eval_options,
        )?;
        let title = format!("{} mock evaluation", site.display_name());
        let summary = render_report(&metrics, &title, eval_options.max_examples);
        let artifacts = write_site_artifacts(&run_paths, site, &output, &metrics, &summary)?;

        tracing::info!(
            event = "site_generated",
            site = %site,
            seed = seed.value(),
            rows = output.dataset.row_count(),
            collisions = output.report.collisions(),
            bytes_written = artifacts.bytes_written,
            path = %artifacts.csv_path.display(),
            report = %artifacts.report_path.display(),
            metrics = %artifacts.metrics_path.display(),
            summary = %artifacts.summary_path.display()
        );
        println!(
            "{}: {} rows -> {}",
            site.display_name(),
            output.dataset.row_count(),
            artifacts.csv_path.display()
        );
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);
    println!("Run written to {}", run_paths.root.display());

    Ok(())
}

fn resolve_sites(names: &[String]) -> Result<Vec<Site>, CliError> {
    if names.is_empty() {
        return Ok(Site::ALL.to_vec());
    }
    let mut sites = Vec::with_capacity(names.len());
    for name in names {
        let site = Site::from_name(name)?;
        if !sites.contains(&site) {
            sites.push(site);
        }
    }
    Ok(sites)
}
