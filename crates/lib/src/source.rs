//! Where build descriptors come from.
//!
//! The reporter never reaches for global state itself. It asks a
//! [`DescriptorSource`] for the descriptor, so the binary can read the one
//! stamped at compile time while tests hand in a fixed fixture.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::descriptor::BuildDescriptor;
use crate::error::{BuildInfoError, Result};
use crate::stamp::Stamp;

/// Something that can produce the build descriptor for the current binary.
pub trait DescriptorSource {
  fn read(&self) -> Result<BuildDescriptor>;
}

/// Descriptor embedded into the binary by the build script.
#[derive(Debug, Clone, Copy)]
pub struct Embedded {
  stamp: Stamp,
}

impl Embedded {
  /// Wrap the values the binary captured with `option_env!`.
  pub const fn new(stamp: Stamp) -> Self {
    Self { stamp }
  }
}

impl DescriptorSource for Embedded {
  fn read(&self) -> Result<BuildDescriptor> {
    if !self.stamp.is_stamped() {
      debug!("no build info stamped into binary");
      return Err(BuildInfoError::Unavailable);
    }
    Ok(self.stamp.to_descriptor())
  }
}

/// Descriptor read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
  path: PathBuf,
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl DescriptorSource for FileSource {
  fn read(&self) -> Result<BuildDescriptor> {
    debug!(path = ?self.path, "reading build descriptor file");
    let content = fs::read_to_string(&self.path).map_err(|source| BuildInfoError::Read {
      path: self.path.clone(),
      source,
    })?;
    BuildDescriptor::from_json(&content)
  }
}

/// A fixed, in-memory descriptor.
#[derive(Debug, Clone)]
pub struct Fixed(pub BuildDescriptor);

impl DescriptorSource for Fixed {
  fn read(&self) -> Result<BuildDescriptor> {
    Ok(self.0.clone())
  }
}

impl<S: DescriptorSource + ?Sized> DescriptorSource for &S {
  fn read(&self) -> Result<BuildDescriptor> {
    (**self).read()
  }
}

impl<S: DescriptorSource + ?Sized> DescriptorSource for Box<S> {
  fn read(&self) -> Result<BuildDescriptor> {
    (**self).read()
  }
}
