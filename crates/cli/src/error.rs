// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the pbrs library.
///
/// Service errors keep the response body so callers can show what the
/// board service said.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'pipeboard init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("unauthorized: {0}\n  hint: run 'pipeboard auth' to store a fresh token")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("board service returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("batch returned {actual} results for {expected} routes")]
    BatchMismatch { expected: usize, actual: usize },

    #[error("unexpected response from board service: {0}")]
    UnexpectedResponse(String),

    #[error("not connected to the board service\n  hint: check the api key and team in .pipeboard/config.toml")]
    NotConnected,

    #[error("board '{0}' is a template and is never written to")]
    TemplateBoard(String),

    #[error("board {0} is not in the current snapshot")]
    UnknownBoard(String),

    #[error("list {0} is not in the current snapshot")]
    UnknownList(String),

    #[error("{field} is not configured\n  hint: set it in .pipeboard/config.toml or the environment")]
    NotConfigured { field: &'static str },

    #[error("invalid transport mode: '{0}'\n  hint: valid modes are: auto, direct, curl")]
    InvalidTransportMode(String),

    #[error("encoder failed: {0}")]
    Encoder(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("interactive authorization requires a terminal (TTY)")]
    TtyRequired,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] pb_core::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for pbrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
