// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::common::*;

#[test]
fn dash_c_runs_in_the_given_directory() {
    let temp = init_temp();
    let elsewhere = TempDir::new().unwrap();

    pipeboard()
        .arg("-C")
        .arg(temp.path())
        .arg("status")
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn project_is_found_from_a_subdirectory() {
    let temp = init_temp();
    let nested = temp.path().join("Assets").join("Props");
    std::fs::create_dir_all(&nested).unwrap();

    pipeboard()
        .arg("status")
        .current_dir(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn dash_c_to_missing_directory_fails() {
    let temp = TempDir::new().unwrap();

    pipeboard()
        .arg("-C")
        .arg(temp.path().join("missing"))
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot change to directory"));
}
