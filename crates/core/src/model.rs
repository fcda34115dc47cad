// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory snapshot of the board service's state for one team.
//!
//! The snapshot is an owned tree (boards own lists, lists own cards) rebuilt
//! on every sync or publish. Cross-references between nodes are plain ids
//! (`id_board`, `id_list`, `id_custom_field`) resolved by lookup, never by
//! pointers into the tree.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::layout::{Pipe, TaskType};
use crate::names::{is_template_name, names_match};

/// Name of the custom field that routes cards to task-type directories.
pub const TYPE_FIELD: &str = "Type";

/// Name of the custom field set on every publish.
pub const STATUS_FIELD: &str = "Status";

/// Value written to the status field on every publish.
pub const REVIEW_NEEDED: &str = "Review Needed";

/// How a board is classified, from its background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCategory {
    Assets,
    Shots,
    Other,
}

impl BoardCategory {
    pub fn from_background(background: &str) -> Self {
        match background {
            "purple" => BoardCategory::Assets,
            "orange" => BoardCategory::Shots,
            _ => BoardCategory::Other,
        }
    }
}

impl From<Pipe> for BoardCategory {
    fn from(pipe: Pipe) -> Self {
        match pipe {
            Pipe::Assets => BoardCategory::Assets,
            Pipe::Shots => BoardCategory::Shots,
        }
    }
}

impl fmt::Display for BoardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BoardCategory::Assets => "assets",
            BoardCategory::Shots => "shots",
            BoardCategory::Other => "other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoardPrefs {
    #[serde(default)]
    pub background: String,
}

/// A board: one asset category or one shot sequence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBoard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub prefs: BoardPrefs,
    #[serde(default)]
    pub lists: Vec<RemoteList>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldDefinition>,
}

impl RemoteBoard {
    pub fn category(&self) -> BoardCategory {
        BoardCategory::from_background(&self.prefs.background)
    }

    /// Template boards are copy sources and are never written to.
    pub fn is_template(&self) -> bool {
        is_template_name(&self.name)
    }

    pub fn custom_field(&self, name: &str) -> Option<&CustomFieldDefinition> {
        self.custom_fields.iter().find(|f| f.name == name)
    }

    /// Option id to display text of the board's "Type" field.
    pub fn task_type_options(&self) -> BTreeMap<String, String> {
        self.custom_field(TYPE_FIELD)
            .map(CustomFieldDefinition::option_lookup)
            .unwrap_or_default()
    }

    /// Find the list standing for a local entity name.
    pub fn find_list(&self, entity: &str) -> Option<&RemoteList> {
        self.lists.iter().find(|l| names_match(&l.name, entity))
    }

    pub fn list(&self, list_id: &str) -> Option<&RemoteList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn list_mut(&mut self, list_id: &str) -> Option<&mut RemoteList> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }
}

/// A list: one asset or shot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_board: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub cards: Vec<RemoteCard>,
}

impl RemoteList {
    /// Find the card standing for a local task name.
    pub fn find_card(&self, task: &str) -> Option<&RemoteCard> {
        self.cards.iter().find(|c| names_match(&c.name, task))
    }
}

/// A card: one task of an entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub id_board: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub custom_field_items: Vec<CustomFieldItem>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl RemoteCard {
    /// Attach definition names and option lookups to this card's field items.
    pub fn annotate(&mut self, definitions: &[CustomFieldDefinition]) {
        for item in &mut self.custom_field_items {
            if let Some(def) = definitions.iter().find(|d| d.id == item.id_custom_field) {
                item.field_name = Some(def.name.clone());
                if def.is_list() {
                    item.options = def.option_lookup();
                }
            }
        }
    }

    /// The annotated field item with the given definition name.
    pub fn field(&self, name: &str) -> Option<&CustomFieldItem> {
        self.custom_field_items
            .iter()
            .find(|i| i.field_name.as_deref() == Some(name))
    }

    /// The task type this card's "Type" field selects, if set and known.
    pub fn task_type(&self) -> Option<TaskType> {
        self.field(TYPE_FIELD)?.display_value()?.parse().ok()
    }
}

/// A custom field value set on a card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub id_custom_field: String,
    /// Selected option id for list-type fields.
    #[serde(default)]
    pub id_value: Option<String>,
    /// Raw value for non-list fields.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Definition name, filled in by [`RemoteCard::annotate`].
    #[serde(skip)]
    pub field_name: Option<String>,
    /// Option id to text, filled in by [`RemoteCard::annotate`] for list fields.
    #[serde(skip)]
    pub options: BTreeMap<String, String>,
}

impl CustomFieldItem {
    /// Display text of the selected option.
    pub fn display_value(&self) -> Option<&str> {
        let id = self.id_value.as_deref()?;
        self.options.get(id).map(String::as_str)
    }
}

/// A board's definition of a custom field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomFieldDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub options: Vec<CustomFieldOption>,
}

impl CustomFieldDefinition {
    pub fn is_list(&self) -> bool {
        self.field_type == "list"
    }

    pub fn option_lookup(&self) -> BTreeMap<String, String> {
        self.options
            .iter()
            .map(|o| (o.id.clone(), o.value.text.clone()))
            .collect()
    }

    /// The id of the option whose display text is `text`.
    pub fn option_id(&self, text: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value.text == text)
            .map(|o| o.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomFieldOption {
    pub id: String,
    pub value: OptionText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionText {
    #[serde(default)]
    pub text: String,
}

/// A file attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// All of a team's boards, bucketed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardData {
    pub assets: Vec<RemoteBoard>,
    pub shots: Vec<RemoteBoard>,
    pub other: Vec<RemoteBoard>,
}

impl BoardData {
    /// Add a board to the bucket its background selects.
    pub fn insert(&mut self, board: RemoteBoard) {
        match board.category() {
            BoardCategory::Assets => self.assets.push(board),
            BoardCategory::Shots => self.shots.push(board),
            BoardCategory::Other => self.other.push(board),
        }
    }

    pub fn boards(&self, pipe: Pipe) -> &[RemoteBoard] {
        match pipe {
            Pipe::Assets => &self.assets,
            Pipe::Shots => &self.shots,
        }
    }

    pub fn boards_mut(&mut self, pipe: Pipe) -> &mut Vec<RemoteBoard> {
        match pipe {
            Pipe::Assets => &mut self.assets,
            Pipe::Shots => &mut self.shots,
        }
    }

    /// Look a board up by id in any bucket.
    pub fn board(&self, board_id: &str) -> Option<&RemoteBoard> {
        self.assets
            .iter()
            .chain(&self.shots)
            .chain(&self.other)
            .find(|b| b.id == board_id)
    }

    pub fn board_mut(&mut self, board_id: &str) -> Option<&mut RemoteBoard> {
        self.assets
            .iter_mut()
            .chain(&mut self.shots)
            .chain(&mut self.other)
            .find(|b| b.id == board_id)
    }

    /// Find the writable board standing for a local category.
    pub fn find_board(&self, pipe: Pipe, category: &str) -> Option<&RemoteBoard> {
        self.boards(pipe)
            .iter()
            .find(|b| !b.is_template() && names_match(&b.name, category))
    }

    /// Total lists across asset and shot boards, template boards included.
    pub fn entity_count(&self) -> usize {
        self.assets
            .iter()
            .chain(&self.shots)
            .map(|b| b.lists.len())
            .sum()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
