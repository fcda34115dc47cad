// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Publish records derived from host output paths.
//!
//! The host writes each publish into a fixed layout below the entity
//! directory, so the entity, task and version can be read back from the
//! output path alone:
//!
//! ```text
//! Export:    <entity>/Export/<task>/<version>/<unit>/<file>
//! Playblast: <entity>/Playblasts/<task>/<version>/<file>
//! Render:    <entity>/Rendering/<kind>/<task>/<version>/<layer>/<file>
//! ```
//!
//! Each version directory holds a `versioninfo.yml` written by the host.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::layout::{path_to_category, split_shot_dir, task_dir, Pipe, ProjectLayout, TaskType};

/// File name of the host's per-version metadata.
pub const VERSION_INFO_FILE: &str = "versioninfo.yml";

/// Which host hook produced the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishKind {
    Export,
    Playblast,
    Render,
}

impl PublishKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishKind::Export => "export",
            PublishKind::Playblast => "playblast",
            PublishKind::Render => "render",
        }
    }

    /// Position of the entity directory, counted from the end of the path.
    fn entity_offset(&self) -> usize {
        match self {
            PublishKind::Export => 6,
            PublishKind::Playblast => 5,
            PublishKind::Render => 7,
        }
    }

    /// Position of the task directory, counted from the end of the path.
    fn task_offset(&self) -> usize {
        match self {
            PublishKind::Export => 4,
            PublishKind::Playblast => 3,
            PublishKind::Render => 4,
        }
    }

    /// Levels between the output file and its version directory.
    fn version_depth(&self) -> usize {
        match self {
            PublishKind::Export | PublishKind::Render => 2,
            PublishKind::Playblast => 1,
        }
    }
}

impl fmt::Display for PublishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PublishKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "export" => Ok(PublishKind::Export),
            "playblast" => Ok(PublishKind::Playblast),
            "render" | "imagerender" => Ok(PublishKind::Render),
            _ => Err(Error::UnknownPublishKind(s.to_string())),
        }
    }
}

/// Encoded bytes to attach to the card, with the file extension to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    pub bytes: Vec<u8>,
    pub ext: String,
}

/// Everything known about one publish event.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRecord {
    pub author: String,
    pub plugin: String,
    pub publish_file: PathBuf,
    pub pipe: Pipe,
    pub category: String,
    pub entity: String,
    pub task: String,
    pub task_type: TaskType,
    pub comment: String,
    pub version: String,
    pub timestamp: String,
    pub dependencies: Vec<String>,
    pub start_frame: i64,
    pub end_frame: i64,
    /// Local task directory, where the card id is recorded.
    pub task_path: PathBuf,
    pub attachment: Option<AttachmentPayload>,
}

/// The pieces of an output path, before the version info is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPath {
    pub base: PathBuf,
    pub entity: String,
    pub task: String,
    pub task_type: TaskType,
    pub version_dir: PathBuf,
}

impl PublishPath {
    pub fn parse(kind: PublishKind, publish_file: &Path) -> Result<Self> {
        let parts: Vec<&OsStr> = publish_file.iter().collect();
        let too_short = || Error::PathTooShort {
            kind: kind.as_str(),
            path: publish_file.to_path_buf(),
        };

        let entity_idx = parts
            .len()
            .checked_sub(kind.entity_offset())
            .ok_or_else(too_short)?;
        let task_idx = parts.len() - kind.task_offset();

        let base: PathBuf = parts[..=entity_idx].iter().collect();
        let entity = parts[entity_idx].to_string_lossy().into_owned();
        let task = parts[task_idx].to_string_lossy().into_owned();

        let mut version_dir = publish_file;
        for _ in 0..kind.version_depth() {
            version_dir = version_dir.parent().ok_or_else(too_short)?;
        }

        let task_type = match kind {
            PublishKind::Export => TaskType::Export,
            PublishKind::Playblast => TaskType::Playblast,
            PublishKind::Render => render_task_type(&parts[entity_idx + 1..task_idx]),
        };

        Ok(PublishPath {
            base,
            entity,
            task,
            task_type,
            version_dir: version_dir.to_path_buf(),
        })
    }

    /// Comment the host encodes in the version directory name.
    pub fn comment(&self) -> String {
        self.version_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .and_then(|n| n.split('_').nth(1).map(str::to_string))
            .unwrap_or_default()
    }
}

/// Pick the render flavour from the directories between entity and task.
fn render_task_type(between: &[&OsStr]) -> TaskType {
    [TaskType::TwoD, TaskType::External, TaskType::Render]
        .into_iter()
        .find(|t| {
            let sub = t.subpath();
            sub.len() == between.len() && sub.iter().zip(between).all(|(a, b)| OsStr::new(a) == *b)
        })
        .unwrap_or(TaskType::Render)
}

#[derive(Debug, Deserialize)]
struct VersionInfoFile {
    information: VersionInfo,
}

/// The `information` section of a version's `versioninfo.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Creation date", default)]
    pub creation_date: String,
    #[serde(rename = "Dependencies", default)]
    pub dependencies: Vec<String>,
}

impl VersionInfo {
    pub fn read(version_dir: &Path) -> Result<Self> {
        let path = version_dir.join(VERSION_INFO_FILE);
        let content = fs::read_to_string(&path)?;
        let file: VersionInfoFile =
            serde_yaml_ng::from_str(&content).map_err(|e| Error::VersionInfo {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        Ok(file.information)
    }
}

/// Who published, from which host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSource {
    pub author: String,
    pub plugin: String,
}

impl PublishRecord {
    /// Build the record for an output file written by a host hook.
    ///
    /// Frames and attachment are left empty for the caller to fill in.
    pub fn derive(
        layout: &ProjectLayout,
        source: &PublishSource,
        kind: PublishKind,
        publish_file: &Path,
    ) -> Result<Self> {
        let parsed = PublishPath::parse(kind, publish_file)?;

        let (pipe, category, entity) = if publish_file.starts_with(&layout.asset_root) {
            let category = parsed
                .base
                .parent()
                .and_then(|p| p.strip_prefix(&layout.asset_root).ok())
                .map(path_to_category)
                .unwrap_or_default();
            if category.is_empty() {
                return Err(Error::NotInPipeline(publish_file.to_path_buf()));
            }
            (Pipe::Assets, category, parsed.entity.clone())
        } else if publish_file.starts_with(&layout.shot_root) {
            let (category, entity) = split_shot_dir(&parsed.entity)?;
            (Pipe::Shots, category.to_string(), entity.to_string())
        } else {
            return Err(Error::NotInPipeline(publish_file.to_path_buf()));
        };

        let info = VersionInfo::read(&parsed.version_dir)?;

        Ok(PublishRecord {
            author: source.author.clone(),
            plugin: source.plugin.clone(),
            publish_file: publish_file.to_path_buf(),
            pipe,
            category,
            entity,
            comment: parsed.comment(),
            task_path: task_dir(&parsed.base, parsed.task_type, &parsed.task),
            task: parsed.task,
            task_type: parsed.task_type,
            version: info.version,
            timestamp: info.creation_date,
            dependencies: info.dependencies,
            start_frame: 0,
            end_frame: 0,
            attachment: None,
        })
    }
}

/// Whether an output was written to the artist's local-only root.
pub fn is_local_only(publish_file: &Path, local_root: Option<&Path>, use_local_files: bool) -> bool {
    match local_root {
        Some(root) if use_local_files => publish_file.starts_with(root),
        _ => false,
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
