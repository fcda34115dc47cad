// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::common::*;

#[yare::parameterized(
    up = { "up" },
    down = { "down" },
)]
fn disabled_sync_prints_notice_and_succeeds(direction: &str) {
    let temp = init_temp();

    pipeboard()
        .args(["sync", direction])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("board integration is disabled"));
}

#[test]
fn disabled_sync_down_creates_nothing() {
    let temp = init_temp();

    pipeboard()
        .args(["sync", "down"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(!exists(&temp.path().join("Assets")));
    assert!(!exists(&temp.path().join("Shots")));
}
