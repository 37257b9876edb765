//! Build script for embedding build metadata via vergen-gitcl.

use std::env;
use std::io;

use buildinfo_lib::stamp;
use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder, RustcBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  if !stamp::write_instructions(&mut io::stdout(), |name| env::var(name).ok())? {
    return Ok(());
  }

  let cargo = CargoBuilder::default()
    .debug(true)
    .opt_level(true)
    .target_triple(true)
    .build()?;
  let rustc = RustcBuilder::default().semver(true).build()?;
  let gitcl = GitclBuilder::all_git()?;

  // Outside a work tree the git values fall back to placeholders, which the
  // binary ignores.
  Emitter::default()
    .quiet()
    .add_instructions(&cargo)?
    .add_instructions(&rustc)?
    .add_instructions(&gitcl)?
    .emit()?;

  Ok(())
}
