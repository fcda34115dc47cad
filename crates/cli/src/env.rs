// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Every environment variable pipeboard reads is named here. The name
//! constants are generated by `build.rs` and live in [`vars`].

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `PIPEBOARD_TOKEN` if set and non-empty.
pub fn token() -> Option<String> {
    non_empty(vars::PIPEBOARD_TOKEN)
}

/// Returns the value of `PIPEBOARD_API_KEY` if set and non-empty.
pub fn api_key() -> Option<String> {
    non_empty(vars::PIPEBOARD_API_KEY)
}

/// Returns the value of `PIPEBOARD_TRANSPORT` if set and non-empty.
pub fn transport() -> Option<String> {
    non_empty(vars::PIPEBOARD_TRANSPORT)
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
