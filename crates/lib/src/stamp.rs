//! Compile-time stamp of the build descriptor.
//!
//! The build script writes the instructions from [`write_instructions`] and
//! then runs `vergen-gitcl`, which emits `VERGEN_*` variables for cargo, rustc
//! and git. The binary captures those variables with `option_env!` into a
//! [`Stamp`], and [`Stamp::to_descriptor`] turns them into settings:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `BUILDINFO_PROFILE` | `-profile` |
//! | `VERGEN_CARGO_TARGET_TRIPLE` | `-target` |
//! | `VERGEN_CARGO_OPT_LEVEL` | `opt-level` |
//! | `VERGEN_CARGO_DEBUG` | `debug` |
//! | `VERGEN_GIT_SHA` | `vcs.revision` |
//! | `VERGEN_GIT_COMMIT_TIMESTAMP` | `vcs.time` |
//! | `VERGEN_GIT_DIRTY` | `vcs.modified` |
//!
//! Setting `BUILDINFO_STAMP=0` (or `false`, `no`, `off`) in the build
//! environment skips stamping; the resulting binary reports that no build
//! info is available.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::descriptor::{BuildDescriptor, DEVEL_VERSION, Setting};

/// Build environment variable that turns stamping off.
pub const STAMP_ENV: &str = "BUILDINFO_STAMP";

/// Compile-time variable carrying the main package version. Its presence
/// marks a stamped binary.
pub const VERSION_ENV: &str = "BUILDINFO_VERSION";

/// Compile-time variable carrying the Cargo profile.
pub const PROFILE_ENV: &str = "BUILDINFO_PROFILE";

/// Value vergen emits in place of data it could not determine.
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Returns false when `value` explicitly disables stamping.
pub fn stamping_enabled(value: Option<&str>) -> bool {
  match value {
    Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
    None => true,
  }
}

/// Write the build-script instructions that precede the vergen output.
///
/// Build-script variables are looked up through `var`. Returns whether
/// stamping is enabled; when it is not, only the rerun trigger is written and
/// the caller must skip the vergen emitter.
pub fn write_instructions<W, F>(out: &mut W, var: F) -> io::Result<bool>
where
  W: Write + ?Sized,
  F: Fn(&str) -> Option<String>,
{
  writeln!(out, "cargo:rerun-if-env-changed={}", STAMP_ENV)?;

  if !stamping_enabled(var(STAMP_ENV).as_deref()) {
    return Ok(false);
  }

  let version = var("CARGO_PKG_VERSION")
    .filter(|v| !v.is_empty())
    .unwrap_or_else(|| DEVEL_VERSION.to_string());
  writeln!(out, "cargo:rustc-env={}={}", VERSION_ENV, version)?;

  if let Some(profile) = var("PROFILE") {
    writeln!(out, "cargo:rustc-env={}={}", PROFILE_ENV, profile)?;
  }

  Ok(true)
}

/// Build metadata captured at compile time with `option_env!`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stamp {
  pub package: Option<&'static str>,
  pub version: Option<&'static str>,
  pub profile: Option<&'static str>,
  pub target_triple: Option<&'static str>,
  pub opt_level: Option<&'static str>,
  pub debug: Option<&'static str>,
  pub rustc_semver: Option<&'static str>,
  pub git_sha: Option<&'static str>,
  pub git_commit_timestamp: Option<&'static str>,
  pub git_dirty: Option<&'static str>,
}

impl Stamp {
  /// Whether the build script stamped this binary at all.
  pub fn is_stamped(&self) -> bool {
    self.version.is_some()
  }

  /// Build the descriptor, cargo settings first and `vcs*` settings last.
  pub fn to_descriptor(&self) -> BuildDescriptor {
    let mut desc = BuildDescriptor::new(present(self.version).unwrap_or(DEVEL_VERSION));
    desc.path = present(self.package).unwrap_or_default().to_string();
    desc.toolchain = present(self.rustc_semver)
      .map(|semver| format!("rustc {}", semver))
      .unwrap_or_default();

    let cargo = [
      ("-profile", self.profile),
      ("-target", self.target_triple),
      ("opt-level", self.opt_level),
      ("debug", self.debug),
    ];
    for (key, value) in cargo {
      if let Some(value) = present(value) {
        desc.settings.push(Setting::new(key, value));
      }
    }

    desc.settings.extend(self.vcs_settings());
    desc
  }

  /// The `vcs*` settings, empty when no git data was stamped.
  pub fn vcs_settings(&self) -> Vec<Setting> {
    let revision = present(self.git_sha);
    let time = present(self.git_commit_timestamp);
    let modified = present(self.git_dirty);

    if revision.is_none() && time.is_none() && modified.is_none() {
      return Vec::new();
    }

    let mut settings = vec![Setting::new("vcs", "git")];
    if let Some(revision) = revision {
      settings.push(Setting::new("vcs.revision", revision));
    }
    if let Some(time) = time {
      settings.push(Setting::new("vcs.time", normalize_commit_time(time)));
    }
    if let Some(modified) = modified {
      settings.push(Setting::new("vcs.modified", modified));
    }
    settings
  }
}

/// Render a commit timestamp as RFC 3339 in UTC with second precision.
///
/// Values that do not parse are passed through unchanged.
pub fn normalize_commit_time(raw: &str) -> String {
  match DateTime::parse_from_rfc3339(raw) {
    Ok(time) => time.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true),
    Err(e) => {
      debug!(value = %raw, error = %e, "commit timestamp is not RFC 3339");
      raw.to_string()
    }
  }
}

fn present(raw: Option<&'static str>) -> Option<&'static str> {
  raw.map(str::trim).filter(|v| !v.is_empty() && *v != VERGEN_PLACEHOLDER)
}
