// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Two-way reconciliation between the pipeline tree and the boards.
//!
//! Push walks local entity directories and makes sure each has a board and
//! a list. Pull walks the boards and makes sure each list has an entity
//! directory and each typed card a task directory. Both directions only
//! create what is missing, so running either twice changes nothing the
//! second time. Template boards are never touched but still count towards
//! progress.

use std::fs;

use tracing::{info, warn};

use pb_core::layout::{create_entity_skeleton, task_dir};
use pb_core::localinfo::{write_card_id, write_entity_link};
use pb_core::names::{is_template_name, path_segment};
use pb_core::{BoardData, EntityLink, LocalEntity, Pipe, ProjectLayout};

use super::client::BoardClient;
use super::resolve::{find_or_create_board, find_or_create_list, BoardTarget};
use super::transport::Transport;
use crate::error::{Error, Result};

/// Receives progress as units of work finish.
///
/// Cancellation is only checked between units, never during a request.
pub trait Progress {
    fn set_max(&mut self, max: usize);

    fn increment(&mut self);

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Progress sink that ignores everything.
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_max(&mut self, _max: usize) {}

    fn increment(&mut self) {}
}

/// Counts from one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub processed: usize,
    pub skipped: usize,
    pub boards_created: usize,
    pub lists_created: usize,
    pub dirs_created: usize,
    pub cards_linked: usize,
}

fn check_cancelled(progress: &dyn Progress) -> Result<()> {
    if progress.is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}

/// A local entity directory, or the reason it can't be synced.
enum Discovered {
    Entity(LocalEntity),
    Skipped(String),
}

fn discover_entities(layout: &ProjectLayout) -> Result<Vec<Discovered>> {
    let mut found = Vec::new();
    for dir in layout.asset_dirs()? {
        found.push(match layout.asset_entity(&dir) {
            Some(entity) => Discovered::Entity(entity),
            None => Discovered::Skipped(format!(
                "asset {} has no category directory",
                dir.display()
            )),
        });
    }
    for dir in layout.shot_dirs()? {
        found.push(match layout.shot_entity(&dir) {
            Ok(entity) => Discovered::Entity(entity),
            Err(e) => Discovered::Skipped(e.to_string()),
        });
    }
    Ok(found)
}

/// Local to remote: give every local entity a board and a list.
pub fn push<T: Transport>(
    client: &BoardClient<T>,
    data: &mut BoardData,
    target: BoardTarget<'_>,
    layout: &ProjectLayout,
    progress: &mut dyn Progress,
) -> Result<SyncSummary> {
    let discovered = discover_entities(layout)?;
    progress.set_max(discovered.len());

    let mut summary = SyncSummary::default();
    for item in discovered {
        check_cancelled(progress)?;
        match item {
            Discovered::Skipped(reason) => {
                warn!("skipping: {}", reason);
                summary.skipped += 1;
            }
            Discovered::Entity(entity) if is_template_name(&entity.category) => {
                warn!(category = %entity.category, entity = %entity.name, "skipping template category");
                summary.skipped += 1;
            }
            Discovered::Entity(entity) => {
                let board = find_or_create_board(client, data, target, entity.pipe, &entity.category)?;
                let list = find_or_create_list(client, data, &board.id, &entity.name)?;
                write_entity_link(
                    &entity.path,
                    &EntityLink {
                        board_id: board.id,
                        list_id: list.id,
                    },
                )?;
                summary.boards_created += usize::from(board.created);
                summary.lists_created += usize::from(list.created);
                summary.processed += 1;
            }
        }
        progress.increment();
    }

    info!(
        processed = summary.processed,
        boards = summary.boards_created,
        lists = summary.lists_created,
        "push finished"
    );
    Ok(summary)
}

/// Remote to local: give every list an entity directory and every typed
/// card a task directory, recording ids along the way.
pub fn pull(
    data: &BoardData,
    layout: &ProjectLayout,
    progress: &mut dyn Progress,
) -> Result<SyncSummary> {
    progress.set_max(data.entity_count());

    let mut summary = SyncSummary::default();
    for pipe in [Pipe::Assets, Pipe::Shots] {
        for board in data.boards(pipe) {
            if board.is_template() {
                warn!(board = %board.name, "skipping template board");
                for _ in &board.lists {
                    check_cancelled(progress)?;
                    summary.skipped += 1;
                    progress.increment();
                }
                continue;
            }

            for list in &board.lists {
                check_cancelled(progress)?;

                let Some(entity_dir) = layout.entity_dir(pipe, &board.name, &list.name) else {
                    warn!(board = %board.name, list = %list.name, "name has no usable directory, skipping");
                    summary.skipped += 1;
                    progress.increment();
                    continue;
                };
                if create_entity_skeleton(&entity_dir)? {
                    info!(path = %entity_dir.display(), "created entity");
                    summary.dirs_created += 1;
                }
                write_entity_link(
                    &entity_dir,
                    &EntityLink {
                        board_id: board.id.clone(),
                        list_id: list.id.clone(),
                    },
                )?;

                for card in &list.cards {
                    let Some(task_type) = card.task_type() else {
                        warn!(card = %card.name, list = %list.name, board = %board.name, "card has no task type, skipping");
                        continue;
                    };
                    let Some(task_name) = path_segment(&card.name) else {
                        warn!(card = %card.name, list = %list.name, board = %board.name, "card name has no usable directory, skipping");
                        summary.skipped += 1;
                        continue;
                    };
                    let dir = task_dir(&entity_dir, task_type, &task_name);
                    if !dir.is_dir() {
                        fs::create_dir_all(&dir)?;
                        info!(path = %dir.display(), "created task");
                        summary.dirs_created += 1;
                    }
                    write_card_id(&dir, &card.id)?;
                    summary.cards_linked += 1;
                }

                summary.processed += 1;
                progress.increment();
            }
        }
    }

    info!(
        processed = summary.processed,
        created = summary.dirs_created,
        cards = summary.cards_linked,
        "pull finished"
    );
    Ok(summary)
}
