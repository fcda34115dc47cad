// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Author names for publish records.

use std::process::Command;

/// Name used when nothing better is known.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// The author to credit on a card description.
///
/// An explicit name wins, then git's `user.name`, then the login name.
/// Service accounts such as `root` are never credited.
pub fn resolve_author(explicit: Option<&str>) -> String {
    pick_author(explicit, git_user_name(), login_name())
}

fn pick_author(explicit: Option<&str>, git: Option<String>, login: Option<String>) -> String {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or(git)
        .or(login.filter(|l| !is_service_account(l)))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

fn git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}

fn login_name() -> Option<String> {
    ["USER", "LOGNAME", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|s| !s.is_empty())
}

fn is_service_account(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "root" | "system" | "administrator" | "daemon" | "nobody" | "render"
    )
}

#[cfg(test)]
#[path = "author_tests.rs"]
mod tests;
