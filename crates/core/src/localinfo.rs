// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-entity and per-task cross-reference files.
//!
//! Each synced entity directory holds an `entityinfo.toml` recording the
//! board and list it maps to; each published task directory holds a
//! `taskinfo.toml` recording its card. These files are the only durable
//! link between local and remote state. Writes overwrite the previous
//! values and keep any unrelated sections other tools stored there.
//!
//! ```toml
//! [board]
//! board_id = "5c6de1f362df495355f996de"
//! list_id = "5c6de2088ac2313d84bb765b"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::error::{Error, Result};

pub const ENTITY_INFO_FILE: &str = "entityinfo.toml";
pub const TASK_INFO_FILE: &str = "taskinfo.toml";

/// Section all board cross-references are stored under.
pub const SECTION: &str = "board";

const BOARD_ID_KEY: &str = "board_id";
const LIST_ID_KEY: &str = "list_id";
const CARD_ID_KEY: &str = "id";

/// A small sectioned key/value file.
#[derive(Debug, Clone)]
pub struct InfoFile {
    path: PathBuf,
    table: Table,
}

impl InfoFile {
    /// Open a file, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<Table>(&content).map_err(|e| Error::ConfigParse {
                path: path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(InfoFile { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a string value. Empty strings count as unset.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.table
            .get(section)?
            .as_table()?
            .get(key)?
            .as_str()
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let entry = self
            .table
            .entry(section.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        if let Value::Table(t) = entry {
            t.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(&self.table)?)?;
        Ok(())
    }
}

/// The board and list an entity directory is synced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLink {
    pub board_id: String,
    pub list_id: String,
}

/// Read an entity's link. `Ok(None)` if the entity was never synced.
///
/// A file holding one id but not the other is an error: links are only
/// ever written as a pair.
pub fn read_entity_link(entity_dir: &Path) -> Result<Option<EntityLink>> {
    let info = InfoFile::open(entity_dir.join(ENTITY_INFO_FILE))?;
    match (info.get(SECTION, BOARD_ID_KEY), info.get(SECTION, LIST_ID_KEY)) {
        (None, None) => Ok(None),
        (Some(board_id), Some(list_id)) => Ok(Some(EntityLink {
            board_id: board_id.to_string(),
            list_id: list_id.to_string(),
        })),
        (Some(_), None) => Err(Error::MissingConfig {
            path: info.path().to_path_buf(),
            key: LIST_ID_KEY.to_string(),
        }),
        (None, Some(_)) => Err(Error::MissingConfig {
            path: info.path().to_path_buf(),
            key: BOARD_ID_KEY.to_string(),
        }),
    }
}

/// Record the board and list an entity maps to, replacing any previous pair.
pub fn write_entity_link(entity_dir: &Path, link: &EntityLink) -> Result<()> {
    let mut info = InfoFile::open(entity_dir.join(ENTITY_INFO_FILE))?;
    info.set(SECTION, BOARD_ID_KEY, &link.board_id);
    info.set(SECTION, LIST_ID_KEY, &link.list_id);
    debug!(path = %info.path().display(), board = %link.board_id, list = %link.list_id, "wrote entity link");
    info.save()
}

/// Read a task's recorded card id.
pub fn read_card_id(task_dir: &Path) -> Result<Option<String>> {
    let info = InfoFile::open(task_dir.join(TASK_INFO_FILE))?;
    Ok(info.get(SECTION, CARD_ID_KEY).map(str::to_string))
}

/// Record a task's card id, replacing any previous one.
pub fn write_card_id(task_dir: &Path, card_id: &str) -> Result<()> {
    let mut info = InfoFile::open(task_dir.join(TASK_INFO_FILE))?;
    info.set(SECTION, CARD_ID_KEY, card_id);
    debug!(path = %info.path().display(), card = card_id, "wrote card id");
    info.save()
}

#[cfg(test)]
#[path = "localinfo_tests.rs"]
mod tests;
