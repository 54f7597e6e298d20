use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vflow_index::{DEFAULT_INDEX_FILE, IndexBuilder, IndexReport, Scanner};
use vflow_module::ModuleScanner;
use vflow_workflow::WorkflowScanner;

/// vflow-index - Validate published vFlow workflows and modules and regenerate their index.json
#[derive(Parser)]
#[command(name = "vflow-index")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Directory holding workflow documents (*.json)
  #[arg(default_value = "workflows")]
  workflows_dir: PathBuf,

  /// Directory holding module packages (*.zip)
  #[arg(default_value = "modules")]
  modules_dir: PathBuf,

  /// Filename of the index document written into each directory
  #[arg(long, default_value = DEFAULT_INDEX_FILE)]
  output_file: String,

  /// Log filter used when RUST_LOG is not set
  #[arg(long, default_value = "info")]
  log_level: String,
}

/// Settings for one indexing run.
struct IndexerConfig {
  workflows_dir: PathBuf,
  modules_dir: PathBuf,
  output_file: String,
}

impl From<Cli> for IndexerConfig {
  fn from(cli: Cli) -> Self {
    Self {
      workflows_dir: cli.workflows_dir,
      modules_dir: cli.modules_dir,
      output_file: cli.output_file,
    }
  }
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();
  init_tracing(&cli.log_level)?;

  let config = IndexerConfig::from(cli);
  let success = run(&config)?;

  Ok(if success {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}

fn init_tracing(default_filter: &str) -> Result<()> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::try_new(default_filter)
      .with_context(|| format!("invalid log filter: {default_filter}"))?,
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  Ok(())
}

/// Index both directories. Returns true only if neither had a rejected file.
fn run(config: &IndexerConfig) -> Result<bool> {
  println!("vFlow repository index generator");
  println!("{}", "=".repeat(60));

  let workflows = index_directory(WorkflowScanner::new(), &config.workflows_dir, config)?;
  println!();
  let modules = index_directory(ModuleScanner::new(), &config.modules_dir, config)?;

  Ok(workflows.success() && modules.success())
}

fn index_directory<S: Scanner>(
  scanner: S,
  dir: &Path,
  config: &IndexerConfig,
) -> Result<IndexReport> {
  let report = IndexBuilder::new(scanner)
    .with_output_file(&config.output_file)
    .build(dir)
    .with_context(|| format!("failed to index {} in {}", S::ITEM_TYPE, dir.display()))?;

  print_summary(&report);
  Ok(report)
}

fn print_summary(report: &IndexReport) {
  println!("Scanned {} directory: {}", report.item_type, report.directory.display());

  if !report.errors.is_empty() {
    println!();
    println!("Validation failed:");
    for error in &report.errors {
      println!("  {error}");
    }
  }

  if !report.skipped.is_empty() {
    println!();
    println!("Skipped {} file(s)", report.skipped.len());
  }

  println!("{}", "=".repeat(60));
  println!("Indexed {} {}", report.total_count, report.item_type);
  match &report.output_path {
    Some(path) => println!("Index file: {}", path.display()),
    None => println!("Index file: not written, directory does not exist"),
  }
  println!("Updated at: {}", report.last_updated);
}
