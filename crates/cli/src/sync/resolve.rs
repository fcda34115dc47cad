// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Find-or-create for boards, lists and cards.
//!
//! Every lookup first searches the snapshot by normalized name. Anything
//! created is added to the snapshot straight away, so later lookups in the
//! same run find it instead of creating a duplicate.

use tracing::info;

use pb_core::names::{is_template_name, normalize_category, normalize_name};
use pb_core::{BoardData, Pipe, RemoteBoard, RemoteCard, RemoteList};

use super::client::BoardClient;
use super::state::fetch_card;
use super::transport::Transport;
use crate::config::TemplateBoards;
use crate::error::{Error, Result};

/// An id found in or added to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub id: String,
    pub created: bool,
}

impl Resolved {
    fn found(id: &str) -> Self {
        Resolved {
            id: id.to_string(),
            created: false,
        }
    }

    fn created(id: &str) -> Self {
        Resolved {
            id: id.to_string(),
            created: true,
        }
    }
}

/// What new boards are created from, and for which team.
#[derive(Debug, Clone, Copy)]
pub struct BoardTarget<'a> {
    pub team_id: &'a str,
    pub templates: &'a TemplateBoards,
}

/// The board for a pipe's category, copying the pipe's template if needed.
///
/// A new board is re-read with its open lists, and every list copied from
/// the template is closed.
pub fn find_or_create_board<T: Transport>(
    client: &BoardClient<T>,
    data: &mut BoardData,
    target: BoardTarget<'_>,
    pipe: Pipe,
    category: &str,
) -> Result<Resolved> {
    if is_template_name(category) {
        return Err(Error::TemplateBoard(category.to_string()));
    }
    if let Some(board) = data.find_board(pipe, category) {
        return Ok(Resolved::found(&board.id));
    }

    let name = normalize_category(category);
    let created = client.post(
        "boards/",
        &[
            ("name", name.as_str()),
            ("idOrganization", target.team_id),
            ("idBoardSource", target.templates.for_pipe(pipe)),
            ("prefs_permissionLevel", "org"),
        ],
    )?;
    let board_id = created
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::UnexpectedResponse("created board has no id".to_string()))?
        .to_string();

    let body = client.get(
        &format!("boards/{}", board_id),
        &[("lists", "open"), ("customFields", "true")],
    )?;
    let mut board: RemoteBoard = serde_json::from_value(body)?;
    for list in &board.lists {
        client.put(&format!("lists/{}/closed", list.id), &[("value", "true")])?;
    }
    board.lists.clear();

    info!(board = %board.name, %pipe, id = %board.id, "created board");
    let resolved = Resolved::created(&board.id);
    data.boards_mut(pipe).push(board);
    Ok(resolved)
}

/// The list for an entity on a board, creating it if missing.
pub fn find_or_create_list<T: Transport>(
    client: &BoardClient<T>,
    data: &mut BoardData,
    board_id: &str,
    entity: &str,
) -> Result<Resolved> {
    let board = data
        .board_mut(board_id)
        .ok_or_else(|| Error::UnknownBoard(board_id.to_string()))?;
    if board.is_template() {
        return Err(Error::TemplateBoard(board.name.clone()));
    }
    if let Some(list) = board.find_list(entity) {
        return Ok(Resolved::found(&list.id));
    }

    let name = normalize_name(entity);
    let body = client.post("lists/", &[("name", name.as_str()), ("idBoard", board_id)])?;
    let list: RemoteList = serde_json::from_value(body)?;
    info!(list = %list.name, board = %board.name, id = %list.id, "created list");
    let resolved = Resolved::created(&list.id);
    board.lists.push(list);
    Ok(resolved)
}

/// The card for a task on a list, creating it if missing.
///
/// Cards keep the task's own name; only matching is normalized.
pub fn find_or_create_card<T: Transport>(
    client: &BoardClient<T>,
    data: &mut BoardData,
    board_id: &str,
    list_id: &str,
    task: &str,
) -> Result<(RemoteCard, bool)> {
    let board = data
        .board_mut(board_id)
        .ok_or_else(|| Error::UnknownBoard(board_id.to_string()))?;
    let definitions = board.custom_fields.clone();
    let list = board
        .list_mut(list_id)
        .ok_or_else(|| Error::UnknownList(list_id.to_string()))?;
    if let Some(card) = list.find_card(task) {
        return Ok((card.clone(), false));
    }

    let body = client.post("cards/", &[("name", task), ("idList", list_id)])?;
    let card_id = body
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::UnexpectedResponse("created card has no id".to_string()))?;
    let card = fetch_card(client, card_id, &definitions)?;
    info!(card = %card.name, list = %list.name, id = %card.id, "created card");
    list.cards.push(card.clone());
    Ok((card, true))
}
