// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use std::path::PathBuf;

use clap::Args;

/// What a host passes to every post-publish hook.
#[derive(Args, Clone, Debug)]
pub struct PublishArgs {
    /// Scene file the output was published from
    #[arg(long, value_name = "file")]
    pub scenefile: PathBuf,

    /// Published output file
    #[arg(long, value_name = "file")]
    pub outputpath: PathBuf,

    /// First frame of the published range
    #[arg(long, value_name = "frame", default_value_t = 0)]
    pub start_frame: i64,

    /// Last frame of the published range
    #[arg(long, value_name = "frame", default_value_t = 0)]
    pub end_frame: i64,

    /// Image to attach when the output has no preview of its own
    #[arg(long, value_name = "file")]
    pub attach: Option<PathBuf>,

    /// Publisher name (defaults to git user.name, then $USER)
    #[arg(long)]
    pub author: Option<String>,

    /// Host plugin that ran the hook
    #[arg(long, default_value = "pipeboard")]
    pub plugin: String,
}
