// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Card description rewriting.
//!
//! A card description starts with a block of `###`-prefixed lines describing
//! the latest publish. Everything else is user-authored and is kept in its
//! original order below the block.

/// Prefix marking lines owned by the publisher.
pub const PUBLISH_MARKER: &str = "###";

/// The publish block for one version.
pub fn publish_block(version: &str, author: &str, comment: &str) -> String {
    let mut block = format!("{PUBLISH_MARKER}{version} by {author}");
    for line in comment.split('\n') {
        block.push('\n');
        block.push_str(PUBLISH_MARKER);
        block.push_str(line);
    }
    block
}

/// Replace the publish block of `existing`, keeping every other line.
pub fn rewrite_description(existing: &str, version: &str, author: &str, comment: &str) -> String {
    let mut lines = vec![publish_block(version, author, comment)];
    lines.extend(
        existing
            .split('\n')
            .filter(|l| !l.starts_with(PUBLISH_MARKER))
            .map(str::to_string),
    );
    lines.join("\n")
}

#[cfg(test)]
#[path = "description_tests.rs"]
mod tests;
