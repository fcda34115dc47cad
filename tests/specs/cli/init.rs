// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::fs;

use super::common::*;

#[test]
fn init_creates_work_dir() {
    let temp = TempDir::new().unwrap();

    pipeboard()
        .args(["init", "--name", "demo"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized pipeboard"))
        .stdout(predicate::str::contains("Project: demo"));

    let work_dir = temp.path().join(".pipeboard");
    let config = fs::read_to_string(work_dir.join("config.toml")).unwrap();
    assert!(config.contains("name = \"demo\""));
    assert!(config.contains("enabled = false"));
    let gitignore = fs::read_to_string(work_dir.join(".gitignore")).unwrap();
    assert!(gitignore.contains("credentials.toml"));
}

#[test]
fn init_with_path_names_project_after_directory() {
    let temp = TempDir::new().unwrap();
    let show = temp.path().join("shortfilm");

    pipeboard()
        .args(["init", "--path"])
        .arg(&show)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: shortfilm"));

    assert!(show.join(".pipeboard").join("config.toml").is_file());
}

#[test]
fn init_twice_fails() {
    let temp = init_temp();

    pipeboard()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn status_after_init_shows_disabled_sync() {
    let temp = init_temp();

    pipeboard()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("board integration is disabled"));
}
