// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::{Error, Result};
use crate::sync::{authorization_url, Authorizer, PromptAuthorizer};

use super::Project;

pub fn run() -> Result<()> {
    let project = Project::open()?;
    let mut authorizer = PromptAuthorizer::new(&project.work_dir);
    run_impl(
        &project.session.api_key,
        &project.config.project.name,
        &mut authorizer,
    )?;
    println!("Token stored in .pipeboard/credentials.toml");

    let project = Project::load(&project.work_dir, project.overrides.clone())?;
    if project.remote_enabled() {
        project.connect()?;
        println!("Connected to team {}", project.session.team_id);
    }
    Ok(())
}

/// Ask for a token on the authorization page and store it.
pub(crate) fn run_impl(
    api_key: &str,
    app_name: &str,
    authorizer: &mut dyn Authorizer,
) -> Result<String> {
    if api_key.is_empty() {
        return Err(Error::NotConfigured {
            field: "board.api_key",
        });
    }

    let url = authorization_url(api_key, app_name)?;
    let token = authorizer.request_token(&url)?.trim().to_string();
    if token.is_empty() {
        return Err(Error::Unauthorized("no token entered".to_string()));
    }
    authorizer.store_token(&token)?;
    Ok(token)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
