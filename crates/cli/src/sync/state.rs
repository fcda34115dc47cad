// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the [`BoardData`] snapshot of a team.
//!
//! One call lists the team's boards; one batched pass then fetches, per
//! board, its open lists, its custom field definitions, and its open cards
//! twice (once with custom field items, once with attachments). The two card
//! queries are merged by card id.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use pb_core::{Attachment, BoardData, CustomFieldDefinition, RemoteBoard, RemoteCard, RemoteList};

use super::client::BoardClient;
use super::transport::Transport;
use crate::error::Result;

/// Batched routes issued for each board.
pub const ROUTES_PER_BOARD: usize = 4;

fn board_routes(board_id: &str) -> [String; ROUTES_PER_BOARD] {
    [
        format!("/board/{}/lists/open", board_id),
        format!("/boards/{}/customFields", board_id),
        format!("/board/{}/cards/open?customFieldItems=true", board_id),
        format!("/boards/{}/cards/open?attachments=true", board_id),
    ]
}

/// Fetch every open board of a team with its lists, fields and cards.
pub fn fetch_board_data<T: Transport>(client: &BoardClient<T>, team_id: &str) -> Result<BoardData> {
    let listing = client.get(
        &format!("organizations/{}/boards", team_id),
        &[("fields", "id,name,closed,prefs")],
    )?;
    let boards: Vec<RemoteBoard> = serde_json::from_value(listing)?;
    let boards: Vec<RemoteBoard> = boards.into_iter().filter(|b| !b.closed).collect();

    let routes: Vec<String> = boards.iter().flat_map(|b| board_routes(&b.id)).collect();
    let mut responses = client.batch_get(&routes)?.into_iter();

    let mut data = BoardData::default();
    for mut board in boards {
        let mut next = || responses.next().flatten();
        let lists: Vec<RemoteList> = parse_or_empty(&board.id, "lists", next())?;
        let fields: Vec<CustomFieldDefinition> = parse_or_empty(&board.id, "custom fields", next())?;
        let cards: Vec<RemoteCard> = parse_or_empty(&board.id, "cards", next())?;
        let with_attachments: Vec<RemoteCard> = parse_or_empty(&board.id, "attachments", next())?;

        board.custom_fields = fields;
        board.lists = lists;
        assemble_cards(&mut board, cards, with_attachments);
        debug!(board = %board.name, category = %board.category(), lists = board.lists.len(), "loaded board");
        data.insert(board);
    }
    Ok(data)
}

/// Parse a batch sub-response, treating a failed sub-request as empty.
fn parse_or_empty<D: DeserializeOwned>(
    board_id: &str,
    what: &str,
    body: Option<Value>,
) -> Result<Vec<D>> {
    match body {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => {
            warn!(board = board_id, "no {} returned, treating as empty", what);
            Ok(Vec::new())
        }
    }
}

/// Merge attachments into cards, annotate their fields and file them
/// into their lists.
fn assemble_cards(board: &mut RemoteBoard, cards: Vec<RemoteCard>, with_attachments: Vec<RemoteCard>) {
    let mut attachments: HashMap<String, Vec<Attachment>> = with_attachments
        .into_iter()
        .map(|c| (c.id, c.attachments))
        .collect();

    for mut card in cards {
        if let Some(found) = attachments.remove(&card.id) {
            card.attachments = found;
        }
        card.annotate(&board.custom_fields);
        match board.list_mut(&card.id_list) {
            Some(list) => list.cards.push(card),
            None => debug!(card = %card.id, list = %card.id_list, "card on a closed list"),
        }
    }
}

/// Fetch one card with its field items and attachments.
pub fn fetch_card<T: Transport>(
    client: &BoardClient<T>,
    card_id: &str,
    definitions: &[CustomFieldDefinition],
) -> Result<RemoteCard> {
    let body = client.get(
        &format!("cards/{}", card_id),
        &[("customFieldItems", "true"), ("attachments", "true")],
    )?;
    let mut card: RemoteCard = serde_json::from_value(body)?;
    card.annotate(definitions);
    Ok(card)
}
