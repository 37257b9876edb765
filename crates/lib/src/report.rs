//! The build-info reporter.
//!
//! Reads a descriptor from a [`DescriptorSource`] and writes:
//!
//! ```text
//! <main-version>
//! <key> = "<value>"
//! ...
//! ```
//!
//! By default only settings whose key starts with `vcs` are listed, in the
//! order they were recorded. Nothing is written until the descriptor has been
//! obtained, so a retrieval failure leaves the sink untouched.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::descriptor::{BuildDescriptor, Setting};
use crate::error::Result;
use crate::quote::quote;
use crate::source::DescriptorSource;

/// Options controlling which settings are reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
  /// Report every setting instead of only the `vcs*` ones.
  pub all_settings: bool,
}

/// The selected fields of a descriptor, ready for printing.
///
/// The text form shows `version` and `settings`; the JSON form also carries
/// the package path and toolchain when they are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
  #[serde(skip_serializing_if = "String::is_empty")]
  pub path: String,
  pub version: String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub toolchain: String,
  pub settings: Vec<Setting>,
}

impl Report {
  /// Select the reported fields from a descriptor.
  pub fn from_descriptor(desc: &BuildDescriptor, options: &ReportOptions) -> Self {
    let settings: Vec<Setting> = if options.all_settings {
      desc.settings.clone()
    } else {
      desc.vcs_settings().cloned().collect()
    };

    debug!(
      total = desc.settings.len(),
      selected = settings.len(),
      "selected settings for report"
    );

    Self {
      path: desc.path.clone(),
      version: desc.main_version.clone(),
      toolchain: desc.toolchain.clone(),
      settings,
    }
  }

  /// Write the plain-text form.
  pub fn write_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
    writeln!(out, "{}", self.version)?;
    for setting in &self.settings {
      writeln!(out, "{}", format_setting(setting))?;
    }
    out.flush()?;
    Ok(())
  }
}

/// Render one setting as `<key> = "<value>"`.
pub fn format_setting(setting: &Setting) -> String {
  format!("{} = {}", setting.key, quote(&setting.value))
}

/// Obtain the descriptor from `source` and select the reported fields.
pub fn collect<S: DescriptorSource>(source: &S, options: &ReportOptions) -> Result<Report> {
  let desc = source.read()?;
  Ok(Report::from_descriptor(&desc, options))
}

/// Print the main version followed by the `vcs*` settings.
pub fn run<S: DescriptorSource, W: Write + ?Sized>(source: &S, out: &mut W) -> Result<()> {
  run_with(source, out, &ReportOptions::default())
}

/// Like [`run`], with explicit options.
pub fn run_with<S: DescriptorSource, W: Write + ?Sized>(
  source: &S,
  out: &mut W,
  options: &ReportOptions,
) -> Result<()> {
  collect(source, options)?.write_text(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::BuildInfoError;
  use crate::source::{Embedded, Fixed};
  use crate::stamp::Stamp;

  fn render<S: DescriptorSource>(source: &S, options: &ReportOptions) -> String {
    let mut out = Vec::new();
    run_with(source, &mut out, options).unwrap();
    String::from_utf8(out).unwrap()
  }

  fn sample() -> BuildDescriptor {
    BuildDescriptor::new("v1.4.0")
      .with_setting("-profile", "release")
      .with_setting("vcs", "git")
      .with_setting("nonvcs.tool", "x")
      .with_setting("vc", "short")
      .with_setting("vcs.revision", "abc123")
      .with_setting("vcs.time", "2024-03-01T10:00:00Z")
      .with_setting("vcs.modified", "false")
  }

  #[test]
  fn prints_version_then_vcs_settings_in_order() {
    let output = render(&Fixed(sample()), &ReportOptions::default());
    assert_eq!(
      output,
      "v1.4.0\n\
       vcs = \"git\"\n\
       vcs.revision = \"abc123\"\n\
       vcs.time = \"2024-03-01T10:00:00Z\"\n\
       vcs.modified = \"false\"\n"
    );
  }

  #[test]
  fn revision_line_format() {
    let desc = BuildDescriptor::new("(devel)").with_setting("vcs.revision", "abc123");
    let output = render(&Fixed(desc), &ReportOptions::default());
    assert_eq!(output.lines().nth(1), Some(r#"vcs.revision = "abc123""#));
  }

  #[test]
  fn excludes_short_and_substring_keys() {
    let output = render(&Fixed(sample()), &ReportOptions::default());
    assert!(!output.contains("nonvcs.tool"));
    assert!(!output.contains("vc = "));
    assert!(!output.contains("-profile"));
  }

  #[test]
  fn version_only_when_no_settings() {
    let output = render(&Fixed(BuildDescriptor::new("(devel)")), &ReportOptions::default());
    assert_eq!(output, "(devel)\n");
  }

  #[test]
  fn duplicate_keys_are_all_printed() {
    let desc = BuildDescriptor::new("1.0.0")
      .with_setting("vcs.revision", "first")
      .with_setting("vcs.revision", "second");
    let output = render(&Fixed(desc), &ReportOptions::default());
    assert_eq!(
      output,
      "1.0.0\nvcs.revision = \"first\"\nvcs.revision = \"second\"\n"
    );
  }

  #[test]
  fn values_are_quoted() {
    let desc = BuildDescriptor::new("1.0.0").with_setting("vcs.note", "line\n\"x\"");
    let output = render(&Fixed(desc), &ReportOptions::default());
    assert_eq!(output, "1.0.0\nvcs.note = \"line\\n\\\"x\\\"\"\n");
  }

  #[test]
  fn all_settings_option_keeps_everything() {
    let options = ReportOptions { all_settings: true };
    let output = render(&Fixed(sample()), &options);
    assert_eq!(output.lines().count(), 8);
    assert_eq!(output.lines().nth(1), Some(r#"-profile = "release""#));
    assert_eq!(output.lines().nth(4), Some(r#"vc = "short""#));
  }

  #[test]
  fn unavailable_writes_nothing() {
    let mut out = Vec::new();
    let err = run(&Embedded::new(Stamp::default()), &mut out).unwrap_err();
    assert!(matches!(err, BuildInfoError::Unavailable));
    assert!(out.is_empty());
  }

  #[test]
  fn repeated_runs_are_identical() {
    let source = Fixed(sample());
    let mut first = Vec::new();
    let mut second = Vec::new();
    run(&source, &mut first).unwrap();
    run(&source, &mut second).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn report_serializes_selected_settings() {
    let report = Report::from_descriptor(&sample(), &ReportOptions::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["version"], "v1.4.0");
    assert_eq!(json["settings"].as_array().unwrap().len(), 4);
    assert_eq!(json["settings"][1]["key"], "vcs.revision");
    assert!(json.get("path").is_none());
    assert!(json.get("toolchain").is_none());
  }

  #[test]
  fn report_carries_path_and_toolchain() {
    let mut desc = sample();
    desc.path = "buildinfo-cli".to_string();
    desc.toolchain = "rustc 1.85.0".to_string();

    let report = Report::from_descriptor(&desc, &ReportOptions::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["path"], "buildinfo-cli");
    assert_eq!(json["toolchain"], "rustc 1.85.0");

    let mut out = Vec::new();
    report.write_text(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("buildinfo-cli"));
    assert!(!text.contains("rustc"));
  }
}
