// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attachment rotation for published previews.
//!
//! A card keeps at most two preview attachments: `LatestVersion.<ext>` and
//! `PreviousVersion.<ext>`. Before a new preview is uploaded the previous
//! one is deleted and the latest one is renamed, so the card never grows
//! past two previews however many times the task is published.

use crate::model::Attachment;

const LATEST_STEM: &str = "LatestVersion";
const PREVIOUS_STEM: &str = "PreviousVersion";

pub fn latest_name(ext: &str) -> String {
    format!("{LATEST_STEM}.{ext}")
}

pub fn previous_name(ext: &str) -> String {
    format!("{PREVIOUS_STEM}.{ext}")
}

/// One change to a card's attachments before the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationStep {
    Delete { attachment_id: String },
    Rename { attachment_id: String, name: String },
}

/// Steps that make room for a new `LatestVersion.<ext>` upload.
///
/// Deletes come first. If several attachments carry the latest name only
/// the last one survives as the previous version.
pub fn plan_rotation(existing: &[Attachment], ext: &str) -> Vec<RotationStep> {
    let latest = latest_name(ext);
    let previous = previous_name(ext);

    let mut steps: Vec<RotationStep> = existing
        .iter()
        .filter(|a| a.name == previous)
        .map(|a| RotationStep::Delete {
            attachment_id: a.id.clone(),
        })
        .collect();

    let latest_ones: Vec<&Attachment> = existing.iter().filter(|a| a.name == latest).collect();
    if let Some((keep, extra)) = latest_ones.split_last() {
        steps.extend(extra.iter().map(|a| RotationStep::Delete {
            attachment_id: a.id.clone(),
        }));
        steps.push(RotationStep::Rename {
            attachment_id: keep.id.clone(),
            name: previous,
        });
    }

    steps
}

#[cfg(test)]
#[path = "rotation_tests.rs"]
mod tests;
