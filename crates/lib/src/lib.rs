//! buildinfo-lib: Build metadata types and the build-info reporter
//!
//! This crate provides:
//! - `BuildDescriptor`: immutable snapshot of how a binary was built
//! - `DescriptorSource`: where the descriptor comes from (embedded, file, fixed)
//! - `report`: prints the main version and the `vcs*` settings
//! - `stamp`: build-script instructions and the compile-time values behind `Embedded`

pub mod descriptor;
pub mod error;
pub mod quote;
pub mod report;
pub mod source;
pub mod stamp;

pub use descriptor::{BuildDescriptor, Setting};
pub use error::{BuildInfoError, Result};
pub use report::{Report, ReportOptions};
pub use source::{DescriptorSource, Embedded, FileSource, Fixed};
