// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive token authorization.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use url::Url;

use crate::config::Credentials;
use crate::error::{Error, Result};

const AUTHORIZE_URL: &str = "https://trello.com/1/authorize";

/// Page where the user grants the application a never-expiring token.
pub fn authorization_url(api_key: &str, app_name: &str) -> Result<Url> {
    let mut url = Url::parse(AUTHORIZE_URL)?;
    url.query_pairs_mut()
        .append_pair("expiration", "never")
        .append_pair("name", app_name)
        .append_pair("scope", "read,write")
        .append_pair("response_type", "token")
        .append_pair("key", api_key);
    Ok(url)
}

/// Source of fresh user tokens.
pub trait Authorizer {
    /// Show the authorization page and collect the token the user pastes.
    fn request_token(&mut self, url: &Url) -> Result<String>;

    /// Keep the token for later sessions.
    fn store_token(&mut self, token: &str) -> Result<()>;
}

/// Prompts on the terminal and stores the token in `credentials.toml`.
pub struct PromptAuthorizer {
    work_dir: PathBuf,
}

impl PromptAuthorizer {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        PromptAuthorizer {
            work_dir: work_dir.into(),
        }
    }
}

impl Authorizer for PromptAuthorizer {
    fn request_token(&mut self, url: &Url) -> Result<String> {
        if !io::stdin().is_terminal() {
            return Err(Error::TtyRequired);
        }

        let mut stderr = io::stderr();
        writeln!(stderr, "Authorize pipeboard by visiting:\n\n  {}\n", url)?;
        write!(stderr, "Paste the token: ")?;
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let token = line.trim().to_string();
        if token.is_empty() {
            return Err(Error::Unauthorized("no token entered".to_string()));
        }
        Ok(token)
    }

    fn store_token(&mut self, token: &str) -> Result<()> {
        let mut credentials = Credentials::load(&self.work_dir)?;
        credentials.token = Some(token.to_string());
        credentials.save(&self.work_dir)
    }
}
