// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::Result;
use crate::sync::{
    fetch_board_data, pull, push, BarProgress, BoardClient, Progress, SyncSummary, Transport,
};

use super::Project;

/// `pipeboard sync up`
pub fn up() -> Result<()> {
    let project = Project::open()?;
    if !project.remote_enabled() {
        return Ok(());
    }
    let client = project.connect()?;

    let mut progress = BarProgress::new("Pushing");
    let summary = up_impl(&client, &project, &mut progress);
    progress.finish();

    let summary = summary?;
    println!(
        "Pushed {} entities: {} boards and {} lists created, {} skipped",
        summary.processed, summary.boards_created, summary.lists_created, summary.skipped
    );
    Ok(())
}

/// `pipeboard sync down`
pub fn down() -> Result<()> {
    let project = Project::open()?;
    if !project.remote_enabled() {
        return Ok(());
    }
    let client = project.connect()?;

    let mut progress = BarProgress::new("Pulling");
    let summary = down_impl(&client, &project, &mut progress);
    progress.finish();

    let summary = summary?;
    println!(
        "Pulled {} lists: {} folders created, {} cards linked, {} skipped",
        summary.processed, summary.dirs_created, summary.cards_linked, summary.skipped
    );
    Ok(())
}

pub(crate) fn up_impl<T: Transport>(
    client: &BoardClient<T>,
    project: &Project,
    progress: &mut dyn Progress,
) -> Result<SyncSummary> {
    let mut data = fetch_board_data(client, &project.session.team_id)?;
    push(client, &mut data, project.target(), &project.layout(), progress)
}

pub(crate) fn down_impl<T: Transport>(
    client: &BoardClient<T>,
    project: &Project,
    progress: &mut dyn Progress,
) -> Result<SyncSummary> {
    let data = fetch_board_data(client, &project.session.team_id)?;
    pull(&data, &project.layout(), progress)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
