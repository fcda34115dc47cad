// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local pipeline directory layout.
//!
//! The project has two roots. Assets nest under arbitrary category
//! directories (`Assets/Characters/Hero`), shots live flat under the shot
//! root and encode their sequence in the directory name (`Shots/SEQ01-SH010`).
//! Every entity directory is laid out the same way:
//!
//! ```text
//! <entity>/
//!   Export/<task>/
//!   Playblasts/<task>/
//!   Rendering/2dRender/<task>/
//!   Rendering/3dRender/<task>/
//!   Rendering/external/<task>/
//!   Scenefiles/
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::names::{normalize_name, path_segment, CATEGORY_SEPARATOR};

/// Subdirectories created for every new entity.
pub const ENTITY_SKELETON: [&str; 4] = ["Export", "Playblasts", "Rendering", "Scenefiles"];

/// Directory whose presence marks an asset entity (as opposed to a category).
pub const SCENEFILES_DIR: &str = "Scenefiles";

/// Separator between sequence and shot in a shot directory name.
pub const SHOT_SEPARATOR: char = '-';

/// Top-level classification of local entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipe {
    Assets,
    Shots,
}

impl Pipe {
    /// Returns the string representation used in records and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pipe::Assets => "assets",
            Pipe::Shots => "shots",
        }
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of work a task directory (and its card) holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    Export,
    Playblast,
    Render,
    #[serde(rename = "2D")]
    TwoD,
    External,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::Export,
        TaskType::Playblast,
        TaskType::Render,
        TaskType::TwoD,
        TaskType::External,
    ];

    /// Display text of the matching option in the board's "Type" field.
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Export => "Export",
            TaskType::Playblast => "Playblast",
            TaskType::Render => "Render",
            TaskType::TwoD => "2D",
            TaskType::External => "External",
        }
    }

    /// Path components of this task type's directory inside an entity.
    pub fn subpath(&self) -> &'static [&'static str] {
        match self {
            TaskType::Export => &["Export"],
            TaskType::Playblast => &["Playblasts"],
            TaskType::Render => &["Rendering", "3dRender"],
            TaskType::TwoD => &["Rendering", "2dRender"],
            TaskType::External => &["Rendering", "external"],
        }
    }

    /// The subpath joined with the platform separator.
    pub fn subpath_buf(&self) -> PathBuf {
        self.subpath().iter().collect()
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownTaskType(s.to_string()))
    }
}

/// An asset or shot directory found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntity {
    pub pipe: Pipe,
    /// Category as a board would name it: `/`-joined for nested assets.
    pub category: String,
    pub name: String,
    pub path: PathBuf,
}

/// The two roots of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub asset_root: PathBuf,
    pub shot_root: PathBuf,
}

impl ProjectLayout {
    pub fn new(asset_root: impl Into<PathBuf>, shot_root: impl Into<PathBuf>) -> Self {
        ProjectLayout {
            asset_root: asset_root.into(),
            shot_root: shot_root.into(),
        }
    }

    pub fn root(&self, pipe: Pipe) -> &Path {
        match pipe {
            Pipe::Assets => &self.asset_root,
            Pipe::Shots => &self.shot_root,
        }
    }

    /// All asset entity directories, sorted by path.
    ///
    /// An asset is any directory holding a `Scenefiles` folder; everything
    /// above it is category. The walk does not descend into assets.
    pub fn asset_dirs(&self) -> Result<Vec<PathBuf>> {
        if !self.asset_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        let mut walker = WalkDir::new(&self.asset_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.path().join(SCENEFILES_DIR).is_dir() {
                found.push(entry.path().to_path_buf());
                walker.skip_current_dir();
            }
        }
        Ok(found)
    }

    /// All shot directories directly under the shot root, sorted by name.
    pub fn shot_dirs(&self) -> Result<Vec<PathBuf>> {
        if !self.shot_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(&self.shot_root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Interpret an asset directory as an entity.
    ///
    /// Returns `None` for assets sitting directly under the root, which
    /// have no category to map to a board.
    pub fn asset_entity(&self, dir: &Path) -> Option<LocalEntity> {
        let parent = dir.parent()?;
        let relative = parent.strip_prefix(&self.asset_root).ok()?;
        let category = path_to_category(relative);
        if category.is_empty() {
            return None;
        }
        Some(LocalEntity {
            pipe: Pipe::Assets,
            category,
            name: dir.file_name()?.to_string_lossy().into_owned(),
            path: dir.to_path_buf(),
        })
    }

    /// Interpret a shot directory as an entity.
    pub fn shot_entity(&self, dir: &Path) -> Result<LocalEntity> {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (category, name) = split_shot_dir(&dir_name)?;
        Ok(LocalEntity {
            pipe: Pipe::Shots,
            category: category.to_string(),
            name: name.to_string(),
            path: dir.to_path_buf(),
        })
    }

    /// Directory for an entity named by remote board and list names.
    ///
    /// Board names for assets may hold several `/`-separated categories.
    /// Returns `None` when a name leaves no usable directory component.
    pub fn entity_dir(&self, pipe: Pipe, board_name: &str, list_name: &str) -> Option<PathBuf> {
        let entity = path_segment(list_name)?;
        match pipe {
            Pipe::Assets => {
                let mut path = self.asset_root.clone();
                let mut categories = 0;
                for segment in board_name.split(CATEGORY_SEPARATOR) {
                    if normalize_name(segment).is_empty() {
                        continue;
                    }
                    path.push(path_segment(segment)?);
                    categories += 1;
                }
                (categories > 0).then(|| path.join(entity))
            }
            Pipe::Shots => Some(self.shot_root.join(format!(
                "{}{}{}",
                path_segment(board_name)?,
                SHOT_SEPARATOR,
                entity
            ))),
        }
    }
}

/// Directory of a task inside an entity.
pub fn task_dir(entity_dir: &Path, task_type: TaskType, task_name: &str) -> PathBuf {
    entity_dir.join(task_type.subpath_buf()).join(task_name)
}

/// Split a shot directory name into (category, entity) on the first `-`.
///
/// Sequence names therefore cannot contain `-`; shot names may.
pub fn split_shot_dir(dir_name: &str) -> Result<(&str, &str)> {
    match dir_name.split_once(SHOT_SEPARATOR) {
        Some((category, entity)) if !category.is_empty() && !entity.is_empty() => {
            Ok((category, entity))
        }
        _ => Err(Error::UnsplittableShot(dir_name.to_string())),
    }
}

/// Join path components with `/`, the way boards name nested categories.
pub fn path_to_category(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Create a new entity directory with the standard subdirectories.
///
/// Returns false if the directory already existed, in which case nothing
/// is touched.
pub fn create_entity_skeleton(entity_dir: &Path) -> Result<bool> {
    if entity_dir.exists() {
        return Ok(false);
    }
    for sub in ENTITY_SKELETON {
        fs::create_dir_all(entity_dir.join(sub))?;
    }
    Ok(true)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
