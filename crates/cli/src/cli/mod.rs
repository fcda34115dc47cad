// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub use args::PublishArgs;

#[derive(Parser)]
#[command(name = "pipeboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Keep a pipeline's asset and shot folders in step with a task board")]
#[command(
    long_about = "Keep a pipeline's asset and shot folders in step with a task board.\n\n\
    Categories become boards, entities become lists and tasks become cards. \
    Host hooks post each publish to its card."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
// Allow the unit type field pattern which is required for clap's ArgAction::Version/Help
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Run as if pipeboard was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    /// Log every change made on the board service
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize pipeboard in the current directory (or specified path)
    #[command(after_help = colors::examples("\
Examples:
  pipeboard init                     Name the project after the directory
  pipeboard init --name demo         Use an explicit project name
  pipeboard init --path ../show      Initialize another directory"))]
    Init {
        /// Project name, shown on the authorization page
        #[arg(long)]
        name: Option<String>,

        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Show configuration and check the connection
    Status,

    /// Authorize pipeboard on the board service and store the token
    Auth,

    /// Synchronize local folders and remote boards
    #[command(subcommand)]
    Sync(SyncCommand),

    /// Entry points called by host applications
    #[command(subcommand)]
    Hook(HookCommand),

    /// Generate shell completions
    #[command(after_help = colors::examples("\
Examples:
  pipeboard completion bash > ~/.local/share/bash-completion/completions/pipeboard
  pipeboard completion zsh > ~/.zfunc/_pipeboard"))]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SyncCommand {
    /// Create boards and lists for every local entity
    #[command(after_help = colors::examples("\
Examples:
  pipeboard sync up              Push Assets/ and Shots/
  pipeboard sync up --verbose    Log each board and list created"))]
    Up,

    /// Create entity and task folders for every remote list and card
    Down,
}

#[derive(Subcommand)]
pub enum HookCommand {
    /// Check the connection when the host opens the project
    ProjectOpened,

    /// Post an export to its card
    #[command(after_help = colors::examples("\
Examples:
  pipeboard hook post-export --scenefile <file> --outputpath <file>"))]
    PostExport(PublishArgs),

    /// Post a playblast to its card
    PostPlayblast(PublishArgs),

    /// Post a render to its card
    #[command(after_help = colors::examples("\
Examples:
  pipeboard hook post-render --scenefile <file> --outputpath <file> --start-frame 1001"))]
    PostRender(PublishArgs),
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
