//! Build descriptor types.
//!
//! A `BuildDescriptor` is the immutable snapshot of how the running binary
//! was built: the main package version plus an ordered list of settings.
//!
//! # Wire Format
//!
//! Descriptor files read with `--descriptor` use JSON:
//!
//! ```text
//! {"path":"buildinfo-cli","main_version":"0.7.0","toolchain":"rustc 1.85.0",
//!  "settings":[{"key":"vcs","value":"git"},{"key":"vcs.revision","value":"..."}]}
//! ```
//!
//! Settings are an array rather than an object so that duplicate keys and
//! recording order survive serialization.

use serde::{Deserialize, Serialize};

use crate::error::{BuildInfoError, Result};

/// Version recorded when no package version is known.
pub const DEVEL_VERSION: &str = "(devel)";

/// Prefix shared by all version-control settings.
pub const VCS_PREFIX: &str = "vcs";

/// A single key/value pair recorded at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
  pub key: String,
  pub value: String,
}

impl Setting {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }

  /// Returns true if the key starts with `vcs`.
  ///
  /// Keys shorter than the prefix never match, and only a leading match
  /// counts (`nonvcs.tool` is not a VCS setting).
  pub fn is_vcs(&self) -> bool {
    self.key.starts_with(VCS_PREFIX)
  }
}

/// Immutable build metadata for one binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
  /// Main package name.
  #[serde(default)]
  pub path: String,

  /// Main package version, or `(devel)`.
  pub main_version: String,

  /// Compiler version recorded when the descriptor was stamped.
  #[serde(default)]
  pub toolchain: String,

  /// Settings in recording order. Keys are not guaranteed unique.
  #[serde(default)]
  pub settings: Vec<Setting>,
}

impl BuildDescriptor {
  /// Create a descriptor with no settings.
  pub fn new(main_version: impl Into<String>) -> Self {
    Self {
      path: String::new(),
      main_version: main_version.into(),
      toolchain: String::new(),
      settings: Vec::new(),
    }
  }

  /// Append a setting, keeping recording order.
  pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.settings.push(Setting::new(key, value));
    self
  }

  /// Iterate over the version-control settings in recording order.
  pub fn vcs_settings(&self) -> impl Iterator<Item = &Setting> {
    self.settings.iter().filter(|s| s.is_vcs())
  }

  /// Parse a descriptor from its JSON wire form.
  pub fn from_json(raw: &str) -> Result<Self> {
    serde_json::from_str(raw).map_err(BuildInfoError::Malformed)
  }

  /// Serialize to the compact JSON wire form.
  pub fn to_json(&self) -> Result<String> {
    serde_json::to_string(self).map_err(BuildInfoError::Malformed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vcs_prefix_matches_only_at_start() {
    assert!(Setting::new("vcs", "git").is_vcs());
    assert!(Setting::new("vcs.revision", "abc123").is_vcs());
    assert!(Setting::new("vcsfoo", "x").is_vcs());
    assert!(!Setting::new("nonvcs.tool", "x").is_vcs());
    assert!(!Setting::new("VCS.revision", "x").is_vcs());
  }

  #[test]
  fn short_keys_never_match() {
    assert!(!Setting::new("vc", "x").is_vcs());
    assert!(!Setting::new("v", "x").is_vcs());
    assert!(!Setting::new("", "x").is_vcs());
  }

  #[test]
  fn vcs_settings_keeps_order_and_duplicates() {
    let desc = BuildDescriptor::new("1.0.0")
      .with_setting("vcs.time", "2024-01-01T00:00:00Z")
      .with_setting("-profile", "release")
      .with_setting("vcs.revision", "a")
      .with_setting("vcs.revision", "b");

    let keys: Vec<_> = desc.vcs_settings().map(|s| (s.key.as_str(), s.value.as_str())).collect();
    assert_eq!(
      keys,
      vec![
        ("vcs.time", "2024-01-01T00:00:00Z"),
        ("vcs.revision", "a"),
        ("vcs.revision", "b"),
      ]
    );
  }

  #[test]
  fn parses_minimal_json() {
    let desc = BuildDescriptor::from_json(r#"{"main_version":"(devel)"}"#).unwrap();
    assert_eq!(desc.main_version, DEVEL_VERSION);
    assert!(desc.settings.is_empty());
    assert!(desc.path.is_empty());
  }

  #[test]
  fn json_preserves_setting_order() {
    let desc = BuildDescriptor::new("0.1.0")
      .with_setting("vcs.modified", "false")
      .with_setting("vcs", "git");
    let json = desc.to_json().unwrap();
    assert!(json.find("vcs.modified").unwrap() < json.find("\"vcs\"").unwrap());
    assert_eq!(BuildDescriptor::from_json(&json).unwrap(), desc);
  }

  #[test]
  fn rejects_malformed_json() {
    let err = BuildDescriptor::from_json("{not json").unwrap_err();
    assert!(matches!(err, BuildInfoError::Malformed(_)));
    assert!(err.to_string().starts_with("failed to read build info"));
  }

  #[test]
  fn missing_version_is_malformed() {
    let err = BuildDescriptor::from_json(r#"{"settings":[]}"#).unwrap_err();
    assert!(matches!(err, BuildInfoError::Malformed(_)));
  }
}
