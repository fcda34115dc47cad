// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::common::*;

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_script(shell: &str) {
    let output = pipeboard().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pipeboard"));
}

#[test]
fn completion_works_outside_a_project() {
    let temp = TempDir::new().unwrap();
    pipeboard()
        .args(["completion", "bash"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn completion_invalid_shell_fails() {
    pipeboard()
        .args(["completion", "tcsh"])
        .assert()
        .failure();
}
