// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.pipeboard/config.toml`:
//!
//! ```toml
//! [project]
//! name = "shortfilm"
//! asset_root = "Assets"
//! shot_root = "Shots"
//!
//! [board]
//! enabled = true
//! api_key = "..."
//! team_url = "https://trello.com/shortfilmteam"
//! ```
//!
//! The user token is kept apart in `.pipeboard/credentials.toml`, which the
//! written `.gitignore` keeps out of version control.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pb_core::ProjectLayout;

use crate::env;
use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".pipeboard";
const CONFIG_FILE_NAME: &str = "config.toml";
const CREDENTIALS_FILE_NAME: &str = "credentials.toml";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Base URL of the board service REST API.
pub const DEFAULT_API_URL: &str = "https://api.trello.com/1/";

/// Board copied when a new asset category board is created.
pub const ASSET_TEMPLATE_BOARD: &str = "5c6de1f362df495355f996de";

/// Board copied when a new shot sequence board is created.
pub const SHOT_TEMPLATE_BOARD: &str = "5c6de2088ac2313d84bb765b";

const DEFAULT_MAX_ATTACHMENT_SIZE: u64 = 8_000_000;

/// Project configuration stored in `.pipeboard/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub encoder: EncoderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Relative paths resolve against the directory holding `.pipeboard/`.
    pub asset_root: PathBuf,
    pub shot_root: PathBuf,
    /// Artist-local output root; publishes below it never reach the board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_root: Option<PathBuf>,
    #[serde(default)]
    pub use_local_files: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Team page URL, used when `team_id` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default)]
    pub templates: TemplateBoards,
}

impl BoardConfig {
    /// The team id, either given directly or read from the team page URL.
    pub fn resolved_team_id(&self) -> Option<String> {
        if let Some(id) = self.team_id.as_deref().filter(|s| !s.is_empty()) {
            return Some(id.to_string());
        }
        team_id_from_url(self.team_url.as_deref()?)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Team id is the fourth `/`-separated component of a team page URL.
pub fn team_id_from_url(url: &str) -> Option<String> {
    url.split('/')
        .nth(3)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Boards copied when creating a board for a new category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBoards {
    #[serde(default = "default_asset_template")]
    pub assets: String,
    #[serde(default = "default_shot_template")]
    pub shots: String,
}

impl Default for TemplateBoards {
    fn default() -> Self {
        TemplateBoards {
            assets: default_asset_template(),
            shots: default_shot_template(),
        }
    }
}

impl TemplateBoards {
    pub fn for_pipe(&self, pipe: pb_core::Pipe) -> &str {
        match pipe {
            pb_core::Pipe::Assets => &self.assets,
            pb_core::Pipe::Shots => &self.shots,
        }
    }
}

fn default_asset_template() -> String {
    ASSET_TEMPLATE_BOARD.to_string()
}

fn default_shot_template() -> String {
    SHOT_TEMPLATE_BOARD.to_string()
}

/// How HTTP requests reach the board service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Direct if a TLS 1.2 client can be built, curl otherwise.
    #[default]
    Auto,
    Direct,
    Curl,
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(TransportMode::Auto),
            "direct" => Ok(TransportMode::Direct),
            "curl" => Ok(TransportMode::Curl),
            _ => Err(Error::InvalidTransportMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub mode: TransportMode,
    #[serde(default = "default_curl")]
    pub curl: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            mode: TransportMode::default(),
            curl: default_curl(),
        }
    }
}

fn default_curl() -> String {
    "curl".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,
    /// Hard cap on encoded preview size, in bytes.
    #[serde(default = "default_max_size")]
    pub max_size: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            ffmpeg: default_ffmpeg(),
            max_size: default_max_size(),
        }
    }
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_ATTACHMENT_SIZE
}

impl Config {
    /// Creates a config with the conventional `Assets`/`Shots` roots.
    pub fn new(name: &str) -> Self {
        Config {
            project: ProjectConfig {
                name: name.to_string(),
                asset_root: PathBuf::from("Assets"),
                shot_root: PathBuf::from("Shots"),
                local_root: None,
                use_local_files: false,
            },
            board: BoardConfig::default(),
            transport: TransportConfig::default(),
            encoder: EncoderConfig::default(),
        }
    }

    /// Loads configuration from the given `.pipeboard/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Saves configuration to the given `.pipeboard/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(work_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }

    /// The project's directory layout with roots made absolute.
    pub fn layout(&self, work_dir: &Path) -> ProjectLayout {
        ProjectLayout::new(
            resolve_root(work_dir, &self.project.asset_root),
            resolve_root(work_dir, &self.project.shot_root),
        )
    }

    pub fn local_root(&self, work_dir: &Path) -> Option<PathBuf> {
        self.project
            .local_root
            .as_deref()
            .map(|p| resolve_root(work_dir, p))
    }
}

fn resolve_root(work_dir: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() {
        root.to_path_buf()
    } else {
        work_dir.parent().unwrap_or(work_dir).join(root)
    }
}

/// The user's token, stored in `.pipeboard/credentials.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Credentials {
    /// Missing file means no credentials yet.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let path = work_dir.join(CREDENTIALS_FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| Error::Config(format!("failed to parse credentials: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Credentials::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize credentials: {}", e)))?;
        fs::write(work_dir.join(CREDENTIALS_FILE_NAME), content)?;
        Ok(())
    }
}

/// Values the environment may override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub token: Option<String>,
    pub api_key: Option<String>,
    pub transport: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        EnvOverrides {
            token: env::token(),
            api_key: env::api_key(),
            transport: env::transport(),
        }
    }
}

/// Everything needed to talk to the board service, built once per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub enabled: bool,
    pub api_key: String,
    pub team_id: String,
    pub token: Option<String>,
}

impl Session {
    pub fn new(config: &Config, credentials: &Credentials, overrides: &EnvOverrides) -> Self {
        Session {
            enabled: config.board.enabled,
            api_key: overrides
                .api_key
                .clone()
                .unwrap_or_else(|| config.board.api_key.clone()),
            team_id: config.board.resolved_team_id().unwrap_or_default(),
            token: overrides
                .token
                .clone()
                .or_else(|| credentials.token.clone())
                .filter(|t| !t.is_empty()),
        }
    }

    /// Fails when the session cannot reach the service at all.
    pub fn require_remote(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::NotConfigured { field: "board.api_key" });
        }
        if self.team_id.is_empty() {
            return Err(Error::NotConfigured { field: "board.team_id" });
        }
        Ok(())
    }
}

/// Transport mode after the environment override is applied.
pub fn effective_transport_mode(config: &Config, overrides: &EnvOverrides) -> Result<TransportMode> {
    match overrides.transport.as_deref() {
        Some(mode) => mode.parse(),
        None => Ok(config.transport.mode),
    }
}

/// Find the .pipeboard directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Find the .pipeboard directory by walking up from `start`
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.join(CONFIG_FILE_NAME).is_file() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Initialize a new .pipeboard directory at the given path
pub fn init_work_dir(path: &Path, name: &str) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    Config::new(name).save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore that keeps the user token out of version control.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let content = format!("# User token\n{}\n", CREDENTIALS_FILE_NAME);
    fs::write(work_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
