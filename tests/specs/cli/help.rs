// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::common::*;

#[test]
fn help_lists_commands() {
    pipeboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync up"))
        .stdout(predicate::str::contains("sync down"))
        .stdout(predicate::str::contains("hook"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn help_output_is_plain_without_color() {
    let output = pipeboard().arg("--help").output().unwrap();
    assert!(!String::from_utf8_lossy(&output.stdout).contains('\x1b'));
}

#[yare::parameterized(
    short = { "-v" },
    short_alias = { "-V" },
    long = { "--version" },
)]
fn version_flags(flag: &str) {
    pipeboard()
        .arg(flag)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pipeboard "));
}

#[yare::parameterized(
    init = { &["init", "--help"] },
    sync_up = { &["sync", "up", "--help"] },
    post_render = { &["hook", "post-render", "--help"] },
)]
fn subcommand_help_has_examples(args: &[&str]) {
    pipeboard()
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn post_export_help_lists_hook_flags() {
    pipeboard()
        .args(["hook", "post-export", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--scenefile"))
        .stdout(predicate::str::contains("--outputpath"))
        .stdout(predicate::str::contains("--start-frame"))
        .stdout(predicate::str::contains("--attach"));
}
