//! Error types for reading and reporting build metadata.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while obtaining or printing a build descriptor.
#[derive(Debug, Error)]
pub enum BuildInfoError {
  /// No descriptor was stamped into the running binary.
  #[error("failed to read build info")]
  Unavailable,

  #[error("failed to read build info: malformed descriptor: {0}")]
  Malformed(#[source] serde_json::Error),

  #[error("failed to read build info from {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write report: {0}")]
  Write(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BuildInfoError>;
