//! CLI output formatting utilities.
//!
//! Text output is written by the reporter itself; this module covers the
//! format switch and JSON rendering.

use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  let mut stdout = std::io::stdout().lock();
  writeln!(stdout, "{}", json).context("Failed to write JSON output")?;
  stdout.flush().context("Failed to flush stdout")?;
  Ok(())
}
