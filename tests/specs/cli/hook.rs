// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::common::*;

const ENABLED_LOCAL: &str = "[project]\nname = \"demo\"\nasset_root = \"Assets\"\nshot_root = \"Shots\"\n\
local_root = \"Local\"\nuse_local_files = true\n\n\
[board]\nenabled = true\napi_key = \"key\"\nteam_id = \"team1\"\n";

#[yare::parameterized(
    export = { "post-export" },
    playblast = { "post-playblast" },
    render = { "post-render" },
)]
fn disabled_publish_hooks_succeed(hook: &str) {
    let temp = init_temp();

    pipeboard()
        .args(["hook", hook, "--scenefile", "a.ma", "--outputpath", "a.abc"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("board integration is disabled"));
}

#[test]
fn disabled_project_opened_succeeds() {
    let temp = init_temp();

    pipeboard()
        .args(["hook", "project-opened"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("board integration is disabled"));
}

#[test]
fn local_only_output_is_skipped_without_connecting() {
    let temp = init_temp();
    write_config(&temp, ENABLED_LOCAL);
    let output = temp
        .path()
        .join("Local/Assets/Props/Chair/Export/model/v0001_x_jdoe/abc/chair.abc");

    pipeboard()
        .args(["hook", "post-export", "--scenefile", "chair.ma", "--outputpath"])
        .arg(&output)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping local-only output"));
}

#[test]
fn output_outside_the_pipeline_fails_before_connecting() {
    let temp = init_temp();
    write_config(&temp, ENABLED_LOCAL);
    let output = temp.path().join("Elsewhere/a/b/c/d/e/f/chair.abc");

    pipeboard()
        .args(["hook", "post-export", "--scenefile", "chair.ma", "--outputpath"])
        .arg(&output)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("in pipeline"));
}
