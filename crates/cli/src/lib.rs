// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! pbrs - board sync for a VFX production pipeline.
//!
//! This crate provides the `pipeboard` CLI: it keeps the asset and shot
//! folders of a project in step with boards on a remote task-board service,
//! and posts every publish from a host application to its card.
//!
//! # Main Components
//!
//! - [`config`] - `.pipeboard/config.toml`, credentials and the per-command [`Session`]
//! - [`sync`] - transport, batched reads, push/pull reconciliation and publish posting
//! - [`Error`] - error types for all operations
//!
//! The local side (layout, link files, names, publish records) lives in
//! `pb-core`.
//!
//! ```rust,ignore
//! use pbrs::sync::{fetch_board_data, push, select_transport, BoardClient, NoProgress};
//!
//! let transport = select_transport(mode, "curl")?;
//! let client = BoardClient::new(transport, config.board.api_url(), &session.api_key, session.token)?;
//! let mut data = fetch_board_data(&client, &session.team_id)?;
//! push(&client, &mut data, target, &layout, &mut NoProgress)?;
//! ```

mod cli;
pub mod colors;
mod commands;
pub mod help;
mod preview;

pub mod config;
pub mod env;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, HookCommand, PublishArgs, SyncCommand};
pub use config::{find_work_dir, init_work_dir, Config, Session};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;
use pb_core::PublishKind;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { name, path } => commands::init::run(name, path),
        Command::Status => commands::status::run(),
        Command::Auth => commands::auth::run(),
        Command::Sync(cmd) => match cmd {
            SyncCommand::Up => commands::sync::up(),
            SyncCommand::Down => commands::sync::down(),
        },
        Command::Hook(cmd) => match cmd {
            HookCommand::ProjectOpened => commands::hook::project_opened(),
            HookCommand::PostExport(args) => commands::hook::publish(PublishKind::Export, args),
            HookCommand::PostPlayblast(args) => {
                commands::hook::publish(PublishKind::Playblast, args)
            }
            HookCommand::PostRender(args) => commands::hook::publish(PublishKind::Render, args),
        },
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "pipeboard", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
