// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! pb-core: local side of the pipeboard board sync
//!
//! This crate holds everything that does not touch the network: the
//! pipeline directory layout, the per-entity and per-task link files, the
//! board service's data model, name matching, card description and
//! attachment rules, and publish records derived from host output paths.

pub mod author;
pub mod description;
pub mod error;
pub mod layout;
pub mod localinfo;
pub mod model;
pub mod names;
pub mod publish;
pub mod rotation;

pub use error::{Error, Result};
pub use layout::{LocalEntity, Pipe, ProjectLayout, TaskType};
pub use localinfo::EntityLink;
pub use model::{
    Attachment, BoardCategory, BoardData, CustomFieldDefinition, CustomFieldItem, RemoteBoard,
    RemoteCard, RemoteList,
};
pub use publish::{AttachmentPayload, PublishKind, PublishRecord, PublishSource};
pub use rotation::RotationStep;
