// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The binary, with the environment overrides cleared.
pub fn pipeboard() -> Command {
    let mut cmd = cargo_bin_cmd!("pipeboard");
    cmd.env_remove("PIPEBOARD_TOKEN")
        .env_remove("PIPEBOARD_API_KEY")
        .env_remove("PIPEBOARD_TRANSPORT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// An initialized project with board sync left disabled.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    pipeboard()
        .args(["init", "--name", "demo"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Replace the whole config.toml.
pub fn write_config(temp: &TempDir, config: &str) {
    fs::write(temp.path().join(".pipeboard").join("config.toml"), config).unwrap();
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}
