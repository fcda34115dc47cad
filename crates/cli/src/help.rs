// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Clap styles matching the colors used in examples blocks.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    let header = colors::style(colors::codes::HEADER);
    let literal = colors::style(colors::codes::LITERAL);
    let context = colors::style(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(context)
        .valid(context)
}

/// Main help template: commands before options.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_sync}
  {sync_up}      Create boards and lists for local entities
  {sync_down}    Create entity and task folders for remote boards
  {status}       Show configuration and check the connection

{header_hooks}
  {hook}         Run a host hook (project-opened, post-export, ...)

{header_setup}
  {init}         Initialize pipeboard in a project
  {auth}         Authorize pipeboard and store the token
  {completion}   Generate shell completions
",
        header_sync = colors::header("Board Sync:"),
        header_hooks = colors::header("Host Integration:"),
        header_setup = colors::header("Setup:"),
        sync_up = colors::literal("sync up"),
        sync_down = colors::literal("sync down"),
        status = colors::literal("status"),
        hook = colors::literal("hook"),
        init = colors::literal("init"),
        auth = colors::literal("auth"),
        completion = colors::literal("completion"),
    )
}

/// Quickstart shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  pipeboard init --name demo    Create .pipeboard/ in this project
  pipeboard auth                Store a board service token
  pipeboard sync up             Push local assets and shots
  pipeboard sync down           Pull boards into local folders",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
