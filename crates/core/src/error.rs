// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for pb-core operations.

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur in pb-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown publish kind: '{0}'\n  hint: valid kinds are: export, playblast, render")]
    UnknownPublishKind(String),

    #[error("unknown task type: '{0}'\n  hint: valid types are: Export, Playblast, Render, 2D, External")]
    UnknownTaskType(String),

    #[error("missing {key} in {}", .path.display())]
    MissingConfig { path: PathBuf, key: String },

    #[error("can't find {} in pipeline\n  hint: the output must live under the asset or shot root", .0.display())]
    NotInPipeline(PathBuf),

    #[error("shot directory '{0}' has no category separator\n  hint: shot directories are named '<sequence>-<shot>'")]
    UnsplittableShot(String),

    #[error("output path too short for a {kind} publish: {}", .path.display())]
    PathTooShort { kind: &'static str, path: PathBuf },

    #[error("invalid version info in {}: {reason}", .path.display())]
    VersionInfo { path: PathBuf, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error in {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// A specialized Result type for pb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
