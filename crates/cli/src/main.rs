use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use buildinfo_lib::report::{self, ReportOptions};
use buildinfo_lib::stamp::Stamp;
use buildinfo_lib::{DescriptorSource, Embedded, FileSource};

mod output;

use output::{OutputFormat, print_json};

/// Values stamped by `build.rs`.
const STAMP: Stamp = Stamp {
  package: option_env!("CARGO_PKG_NAME"),
  version: option_env!("BUILDINFO_VERSION"),
  profile: option_env!("BUILDINFO_PROFILE"),
  target_triple: option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
  opt_level: option_env!("VERGEN_CARGO_OPT_LEVEL"),
  debug: option_env!("VERGEN_CARGO_DEBUG"),
  rustc_semver: option_env!("VERGEN_RUSTC_SEMVER"),
  git_sha: option_env!("VERGEN_GIT_SHA"),
  git_commit_timestamp: option_env!("VERGEN_GIT_COMMIT_TIMESTAMP"),
  git_dirty: option_env!("VERGEN_GIT_DIRTY"),
};

/// buildinfo - print the build metadata embedded in this binary
#[derive(Parser)]
#[command(name = "buildinfo")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Print every recorded setting, not only version-control ones
  #[arg(long)]
  all: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Read the build descriptor from a JSON file instead of this binary
  #[arg(long, value_name = "FILE")]
  descriptor: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  let source: Box<dyn DescriptorSource> = match &cli.descriptor {
    Some(path) => Box::new(FileSource::new(path)),
    None => Box::new(Embedded::new(STAMP)),
  };
  let options = ReportOptions { all_settings: cli.all };

  debug!(format = ?cli.format, all = cli.all, "reporting build info");

  if cli.format.is_json() {
    let report = report::collect(&source, &options)?;
    print_json(&report)?;
  } else {
    report::run_with(&source, &mut io::stdout().lock(), &options)?;
  }

  Ok(())
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .without_time()
    .init();
}
