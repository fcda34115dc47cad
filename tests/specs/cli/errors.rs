// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::common::*;

#[yare::parameterized(
    status = { &["status"] },
    auth = { &["auth"] },
    sync_up = { &["sync", "up"] },
    sync_down = { &["sync", "down"] },
    project_opened = { &["hook", "project-opened"] },
)]
fn commands_outside_a_project_fail(args: &[&str]) {
    let temp = TempDir::new().unwrap();

    pipeboard()
        .args(args)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: not initialized"));
}

#[test]
fn enabled_without_api_key_is_a_config_error() {
    let temp = init_temp();
    write_config(
        &temp,
        "[project]\nname = \"demo\"\nasset_root = \"Assets\"\nshot_root = \"Shots\"\n\n[board]\nenabled = true\n",
    );

    pipeboard()
        .args(["sync", "up"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("board.api_key is not configured"));
}

#[test]
fn unknown_transport_override_is_rejected() {
    let temp = init_temp();
    write_config(
        &temp,
        "[project]\nname = \"demo\"\nasset_root = \"Assets\"\nshot_root = \"Shots\"\n\n\
         [board]\nenabled = true\napi_key = \"key\"\nteam_id = \"team1\"\n",
    );

    pipeboard()
        .args(["hook", "project-opened"])
        .env("PIPEBOARD_TRANSPORT", "pigeon")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid transport mode: 'pigeon'"));
}

#[test]
fn broken_config_is_reported() {
    let temp = init_temp();
    write_config(&temp, "[project\n");

    pipeboard()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}
