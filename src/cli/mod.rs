pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::TakeheadConfig;
use crate::core::markers::MarkerSet;
use crate::rewrite::{self, FileReport, RewriteOptions, WriteMode};
use output::OutputFormat;

/// Resolve merge conflicts in a file by keeping the HEAD side
#[derive(Debug, Parser)]
#[command(name = "takehead")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to resolve (default: the configured target in the repository root)
    pub paths: Vec<PathBuf>,

    /// Config file to use instead of .takehead.toml / the global config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the start marker
    #[arg(long, value_name = "TEXT")]
    pub start: Option<String>,

    /// Override the separator marker
    #[arg(long, value_name = "TEXT")]
    pub separator: Option<String>,

    /// Override the end marker
    #[arg(long, value_name = "TEXT")]
    pub end: Option<String>,

    /// Report what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print a unified diff of each change
    #[arg(long)]
    pub diff: bool,

    /// Exit with an error if any file would change (implies --dry-run)
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn write_mode(&self) -> WriteMode {
        if self.dry_run || self.check {
            WriteMode::DryRun
        } else {
            WriteMode::InPlace
        }
    }

    /// Apply marker overrides from the command line
    fn markers(&self, config: &TakeheadConfig) -> Result<MarkerSet> {
        let mut markers = config.markers.clone();
        if let Some(start) = &self.start {
            markers.start = start.clone();
        }
        if let Some(separator) = &self.separator {
            markers.separator = separator.clone();
        }
        if let Some(end) = &self.end {
            markers.end = end.clone();
        }

        markers.validate()?;
        Ok(markers)
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    run_with(&cli, &cwd)?;

    Ok(())
}

/// Run parsed arguments as if invoked from `cwd`
pub fn run_with(cli: &Cli, cwd: &Path) -> Result<Vec<FileReport>> {
    let root = repo_root(cwd);
    let config = match &cli.config {
        Some(path) => TakeheadConfig::load_from_file(&cwd.join(path))?,
        None => TakeheadConfig::load(&root)?,
    };
    let markers = cli.markers(&config)?;
    tracing::debug!(?markers, root = %root.display(), "using markers");

    let targets = targets(&cli.paths, &config, &root, cwd);
    let options = RewriteOptions {
        mode: cli.write_mode(),
        with_diff: cli.diff,
    };

    let reports = resolve_all(&targets, &markers, &options)?;
    print!("{}", output::format_reports(&reports, cli.format)?);
    if cli.format == OutputFormat::Json {
        println!();
    }

    if cli.check {
        let pending = reports.iter().filter(|r| r.changed).count();
        if pending > 0 {
            anyhow::bail!("{} file(s) contain conflict markers", pending);
        }
    }

    Ok(reports)
}

/// Resolve each target in order, stopping at the first error
pub fn resolve_all(
    targets: &[PathBuf],
    markers: &MarkerSet,
    options: &RewriteOptions,
) -> Result<Vec<FileReport>> {
    targets
        .iter()
        .map(|path| rewrite::resolve_file(path, markers, options))
        .collect()
}

/// Explicit paths are relative to `cwd`; otherwise the configured target under the repo root
fn targets(paths: &[PathBuf], config: &TakeheadConfig, root: &Path, cwd: &Path) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![root.join(&config.target.path)]
    } else {
        paths.iter().map(|p| cwd.join(p)).collect()
    }
}

/// Working directory of the git repository enclosing `cwd`, or `cwd` itself
fn repo_root(cwd: &Path) -> PathBuf {
    git2::Repository::discover(cwd)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
