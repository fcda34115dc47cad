// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Posting a publish to its card.
//!
//! Steps run in order and are not rolled back: a failure part way leaves
//! the card with whatever updates already landed.

use tracing::{debug, info, warn};

use pb_core::description::rewrite_description;
use pb_core::localinfo::{read_card_id, read_entity_link, write_card_id, write_entity_link};
use pb_core::model::{REVIEW_NEEDED, STATUS_FIELD, TYPE_FIELD};
use pb_core::rotation::{latest_name, plan_rotation, RotationStep};
use pb_core::{AttachmentPayload, BoardData, EntityLink, PublishRecord, RemoteCard};

use super::client::BoardClient;
use super::resolve::{find_or_create_board, find_or_create_card, find_or_create_list, BoardTarget};
use super::state::fetch_card;
use super::transport::{FilePart, Method, Transport};
use crate::error::{Error, Result};

/// What a publish left on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub card_id: String,
    pub card_url: String,
    pub description: String,
    pub attached: Option<String>,
}

/// The card a task publishes to.
///
/// The task's recorded card id is tried first. If there is none, or the
/// service no longer knows it, the card is found or created by name and
/// the new id recorded in place of the stale one.
pub fn get_card<T: Transport>(
    client: &BoardClient<T>,
    data: &mut BoardData,
    target: BoardTarget<'_>,
    record: &PublishRecord,
) -> Result<RemoteCard> {
    if let Some(card_id) = read_card_id(&record.task_path)? {
        match fetch_card(client, &card_id, &[]) {
            Ok(card) => {
                debug!(card = %card.id, "using recorded card");
                return Ok(annotated(data, card));
            }
            Err(Error::NotFound(_)) => {
                warn!(card = %card_id, task = %record.task, "recorded card is gone, resolving again");
            }
            Err(e) => return Err(e),
        }
    }

    let entity_dir = entity_dir_of(record);
    let hint = entity_dir
        .as_deref()
        .map(read_entity_link)
        .transpose()?
        .flatten();

    let link = match hint {
        Some(link) if data.board(&link.board_id).and_then(|b| b.list(&link.list_id)).is_some() => link,
        _ => {
            let board = find_or_create_board(client, data, target, record.pipe, &record.category)?;
            let list = find_or_create_list(client, data, &board.id, &record.entity)?;
            let link = EntityLink {
                board_id: board.id,
                list_id: list.id,
            };
            if let Some(dir) = &entity_dir {
                write_entity_link(dir, &link)?;
            }
            link
        }
    };

    let (card, _) = find_or_create_card(client, data, &link.board_id, &link.list_id, &record.task)?;
    write_card_id(&record.task_path, &card.id)?;
    Ok(card)
}

/// Entity directory above a task directory, if the task path is deep enough.
fn entity_dir_of(record: &PublishRecord) -> Option<std::path::PathBuf> {
    let mut dir = record.task_path.as_path();
    for _ in 0..=record.task_type.subpath().len() {
        dir = dir.parent()?;
    }
    Some(dir.to_path_buf())
}

/// Annotate a fetched card with its board's field definitions, which are
/// only known once the card names its board.
fn annotated(data: &BoardData, mut card: RemoteCard) -> RemoteCard {
    if let Some(board) = data.board(&card.id_board) {
        card.annotate(&board.custom_fields);
    }
    card
}

/// Post a publish: bump the list, rewrite the description, rotate and
/// upload the preview, then set the Status and Type fields.
pub fn publish_to_card<T: Transport>(
    client: &BoardClient<T>,
    data: &mut BoardData,
    target: BoardTarget<'_>,
    record: &PublishRecord,
) -> Result<PublishOutcome> {
    let card = get_card(client, data, target, record)?;

    client.put(&format!("lists/{}", card.id_list), &[("pos", "top")])?;

    let description = rewrite_description(&card.desc, &record.version, &record.author, &record.comment);
    client.put(
        &format!("cards/{}", card.id),
        &[
            ("desc", description.as_str()),
            ("pos", "top"),
            ("subscribed", "true"),
        ],
    )?;

    let attached = match &record.attachment {
        Some(payload) => Some(upload_preview(client, &card, payload)?),
        None => None,
    };

    set_list_field(client, data, &card, STATUS_FIELD, REVIEW_NEEDED)?;
    set_list_field(client, data, &card, TYPE_FIELD, record.task_type.label())?;

    info!(
        card = %card.id,
        task = %record.task,
        version = %record.version,
        "published to card"
    );
    Ok(PublishOutcome {
        card_id: card.id,
        card_url: card.url,
        description,
        attached,
    })
}

/// Rotate the card's previews and upload the new one as the latest.
fn upload_preview<T: Transport>(
    client: &BoardClient<T>,
    card: &RemoteCard,
    payload: &AttachmentPayload,
) -> Result<String> {
    for step in plan_rotation(&card.attachments, &payload.ext) {
        match step {
            RotationStep::Delete { attachment_id } => {
                client.delete(&format!("cards/{}/attachments/{}", card.id, attachment_id))?;
            }
            RotationStep::Rename { attachment_id, name } => {
                client.put(
                    &format!("cards/{}/attachments/{}", card.id, attachment_id),
                    &[("name", name.as_str())],
                )?;
            }
        }
    }

    let name = latest_name(&payload.ext);
    client.send(
        Method::Post,
        &format!("cards/{}/attachments", card.id),
        &[("name", name.as_str())],
        Some(FilePart {
            file_name: name.clone(),
            bytes: payload.bytes.clone(),
        }),
    )?;
    debug!(card = %card.id, attachment = %name, bytes = payload.bytes.len(), "uploaded preview");
    Ok(name)
}

/// Select the option with display text `value` in a board's list field.
///
/// A board without the field or the option is logged and left alone.
fn set_list_field<T: Transport>(
    client: &BoardClient<T>,
    data: &BoardData,
    card: &RemoteCard,
    field: &str,
    value: &str,
) -> Result<()> {
    let Some(definition) = data
        .board(&card.id_board)
        .and_then(|b| b.custom_field(field))
    else {
        warn!(card = %card.id, field, "board has no such custom field");
        return Ok(());
    };
    let Some(option_id) = definition.option_id(value) else {
        warn!(card = %card.id, field, value, "custom field has no such option");
        return Ok(());
    };

    client.put(
        &format!("card/{}/customField/{}/item", card.id, definition.id),
        &[("idValue", option_id)],
    )?;
    Ok(())
}
