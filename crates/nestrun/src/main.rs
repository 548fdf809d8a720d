//! Template launcher binary.
//!
//! Copy this file, register the application's entry points and tray icon
//! providers, and append the application archive to the built executable.

use std::process::ExitCode;

use nestrun::{Invocation, Registry};

/// Lists what was extracted for this run.
fn inspect(invocation: &Invocation) -> anyhow::Result<()> {
    println!("target directory: {}", invocation.target_dir().display());
    for library in invocation.context().search_path() {
        println!("library: {}", library.display());
    }
    for arg in invocation.args() {
        println!("argument: {arg}");
    }
    Ok(())
}

fn main() -> ExitCode {
    nestrun::main_with(Registry::new().with_entry_point("nestrun.Inspect", inspect))
}
