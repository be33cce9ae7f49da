//! Shared fixtures

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Temporary project with the given `(relative path, contents)` files
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

pub fn source(
    dir: &TempDir,
    name: &str,
) -> PathBuf {
    dir.path().join(name)
}

/// True when the default C compiler can be started
pub fn have_cc() -> bool {
    Command::new("cc").arg("--version").output().is_ok()
}
