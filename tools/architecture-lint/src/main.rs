//! CLI entry point for the repo-local architecture lint.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let _ = writeln!(io::stderr().lock(), "{message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let root = workspace_root().ok_or_else(|| {
        "unable to locate the workspace root (no ancestor Cargo.toml with a [workspace] table)"
            .to_owned()
    })?;
    architecture_lint::lint_backend_sources(&root.join("backend")).map_err(|err| err.to_string())
}

/// Resolves the workspace root from the environment, the working directory,
/// or this crate's own manifest location, in that order.
fn workspace_root() -> Option<PathBuf> {
    let candidates = [
        env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|start| ascend_to_workspace(&start))
}

fn ascend_to_workspace(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| declares_workspace(&dir.join("Cargo.toml")))
        .map(Path::to_path_buf)
}

fn declares_workspace(manifest: &Path) -> bool {
    fs::read_to_string(manifest).is_ok_and(|contents| contents.contains("[workspace]"))
}
