// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod auth;
pub mod hook;
pub mod init;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use pb_core::ProjectLayout;
use tracing::debug;

use crate::config::{
    effective_transport_mode, find_work_dir, Config, Credentials, EnvOverrides, Session,
};
use crate::error::{Error, Result};
use crate::sync::{select_transport, BoardClient, BoardTarget, PromptAuthorizer};

/// Printed by every remote command when `board.enabled` is off.
pub const DISABLED_NOTICE: &str =
    "board integration is disabled; set board.enabled = true in .pipeboard/config.toml";

/// An initialized project and the session built from it.
pub struct Project {
    pub work_dir: PathBuf,
    pub config: Config,
    pub overrides: EnvOverrides,
    pub session: Session,
}

impl Project {
    /// Find and load the project around the current directory.
    pub fn open() -> Result<Self> {
        Self::load(&find_work_dir()?, EnvOverrides::from_env())
    }

    pub fn load(work_dir: &Path, overrides: EnvOverrides) -> Result<Self> {
        let config = Config::load(work_dir)?;
        let credentials = Credentials::load(work_dir)?;
        let session = Session::new(&config, &credentials, &overrides);
        Ok(Project {
            work_dir: work_dir.to_path_buf(),
            config,
            overrides,
            session,
        })
    }

    pub fn layout(&self) -> ProjectLayout {
        self.config.layout(&self.work_dir)
    }

    pub fn target(&self) -> BoardTarget<'_> {
        BoardTarget {
            team_id: &self.session.team_id,
            templates: &self.config.board.templates,
        }
    }

    /// False (after printing a notice) when board integration is off.
    pub fn remote_enabled(&self) -> bool {
        if !self.session.enabled {
            println!("{}", DISABLED_NOTICE);
        }
        self.session.enabled
    }

    /// Build a client and make sure it can read the team's boards,
    /// asking for a new token on the terminal if the stored one is refused.
    pub fn connect(&self) -> Result<BoardClient> {
        self.session.require_remote()?;
        let mode = effective_transport_mode(&self.config, &self.overrides)?;
        let transport = select_transport(mode, &self.config.transport.curl)?;
        let mut client = BoardClient::new(
            transport,
            self.config.board.api_url(),
            &self.session.api_key,
            self.session.token.clone(),
        )?;

        let mut authorizer = PromptAuthorizer::new(&self.work_dir);
        if !client.connect(
            &self.session.team_id,
            &self.config.project.name,
            &mut authorizer,
        )? {
            return Err(Error::NotConnected);
        }
        debug!(team = %self.session.team_id, "connected");
        Ok(client)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
