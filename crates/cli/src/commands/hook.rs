// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entry points for host applications.
//!
//! Post-publish hooks run in this order: skip local-only output, derive the
//! publish record from the output path, build the preview, then connect and
//! post to the card. Nothing touches the network before the record is known
//! to belong on the board.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use pb_core::author::resolve_author;
use pb_core::publish::is_local_only;
use pb_core::{PublishKind, PublishRecord, PublishSource};

use crate::cli::PublishArgs;
use crate::error::Result;
use crate::preview::{load_preview, preview_source, Encoder};
use crate::sync::{fetch_board_data, publish_to_card, BoardClient, PublishOutcome, Transport};

use super::Project;

/// `pipeboard hook project-opened`
pub fn project_opened() -> Result<()> {
    let project = Project::open()?;
    if !project.remote_enabled() {
        return Ok(());
    }
    project.connect()?;
    println!("Connected to team {}", project.session.team_id);
    Ok(())
}

/// `pipeboard hook post-export|post-playblast|post-render`
pub fn publish(kind: PublishKind, args: PublishArgs) -> Result<()> {
    let project = Project::open()?;
    if !project.remote_enabled() {
        return Ok(());
    }

    let Some(record) = prepare(&project, kind, &args)? else {
        println!("Skipping local-only output {}", args.outputpath.display());
        return Ok(());
    };

    let client = project.connect()?;
    let outcome = post(&client, &project, &record)?;
    println!(
        "Posted {} {} {} to {}",
        record.entity, record.task, record.version, outcome.card_url
    );
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Build the record for a hook call, or `None` for local-only output.
///
/// A preview that cannot be built is logged and left out.
pub(crate) fn prepare(
    project: &Project,
    kind: PublishKind,
    args: &PublishArgs,
) -> Result<Option<PublishRecord>> {
    let output = absolute(&args.outputpath)?;
    let local_root = project.config.local_root(&project.work_dir);
    if is_local_only(
        &output,
        local_root.as_deref(),
        project.config.project.use_local_files,
    ) {
        info!(output = %output.display(), "output is local-only, not posting");
        return Ok(None);
    }

    debug!(
        kind = %kind,
        scenefile = %args.scenefile.display(),
        output = %output.display(),
        "publish hook"
    );
    let source = PublishSource {
        author: resolve_author(args.author.as_deref()),
        plugin: args.plugin.clone(),
    };
    let mut record = PublishRecord::derive(&project.layout(), &source, kind, &output)?;
    record.start_frame = args.start_frame;
    record.end_frame = args.end_frame;

    let encoder = Encoder::new(&project.config.encoder);
    record.attachment = match preview_source(&record, args.attach.as_deref())
        .and_then(|source| load_preview(&source, &encoder))
    {
        Ok(attachment) => attachment,
        Err(e) => {
            warn!(error = %e, "no preview for this publish");
            None
        }
    };
    Ok(Some(record))
}

pub(crate) fn post<T: Transport>(
    client: &BoardClient<T>,
    project: &Project,
    record: &PublishRecord,
) -> Result<PublishOutcome> {
    let mut data = fetch_board_data(client, &project.session.team_id)?;
    publish_to_card(client, &mut data, project.target(), record)
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
