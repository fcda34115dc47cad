// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::init_work_dir;
use crate::error::{Error, Result};

pub fn run(name: Option<String>, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let (work_dir, name) = run_impl(&target_path, name.as_deref())?;

    println!("Initialized pipeboard at {}", work_dir.display());
    println!("Project: {}", name);
    println!("Next: fill in [board] in config.toml, then run 'pipeboard auth'");
    Ok(())
}

/// Create `.pipeboard/` under `target_path`, returning it with the project
/// name used.
pub(crate) fn run_impl(target_path: &Path, name: Option<&str>) -> Result<(PathBuf, String)> {
    fs::create_dir_all(target_path)?;
    let name = match name {
        Some(n) => n.trim().to_string(),
        None => derive_name_from_path(target_path)?,
    };
    if name.is_empty() {
        return Err(Error::Config("project name cannot be empty".to_string()));
    }

    let work_dir = init_work_dir(target_path, &name)?;
    Ok((work_dir, name))
}

/// The directory's own name, after resolving `.` and symlinks.
fn derive_name_from_path(path: &Path) -> Result<String> {
    let resolved = fs::canonicalize(path)?;
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Config("cannot derive a project name from '/'\n  hint: pass --name".to_string()))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
