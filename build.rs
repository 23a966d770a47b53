use std::error::Error;

use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn Error>> {
	let mut emitter = Emitter::default();

	emitter.add_instructions(&CargoBuilder::all_cargo()?)?;

	// Source tarballs carry no git metadata; keep the version string well-formed anyway.
	if emitter.add_instructions(&GitclBuilder::all_git()?).is_err() {
		println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
	}

	emitter.emit()?;

	Ok(())
}
