// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::effective_transport_mode;
use crate::error::Result;

use super::Project;

pub fn run() -> Result<()> {
    let project = Project::open()?;
    for (label, value) in describe(&project)? {
        println!("{:<12} {}", format!("{}:", label), value);
    }

    if !project.remote_enabled() {
        return Ok(());
    }
    project.connect()?;
    println!("{:<12} ok", "Connection:");
    Ok(())
}

fn presence(value: bool, yes: &str, no: &str) -> String {
    let text = if value { yes } else { no };
    text.to_string()
}

/// Configuration summary as label/value rows.
pub(crate) fn describe(project: &Project) -> Result<Vec<(&'static str, String)>> {
    let layout = project.layout();
    let session = &project.session;

    let mut rows = vec![
        ("Project", project.config.project.name.clone()),
        ("Assets", layout.asset_root.display().to_string()),
        ("Shots", layout.shot_root.display().to_string()),
    ];
    if let Some(local) = project.config.local_root(&project.work_dir) {
        let mode = if project.config.project.use_local_files {
            "in use"
        } else {
            "not in use"
        };
        rows.push(("Local root", format!("{} ({})", local.display(), mode)));
    }
    rows.push((
        "Board sync",
        presence(session.enabled, "enabled", "disabled"),
    ));
    rows.push((
        "Team",
        if session.team_id.is_empty() {
            "(not set)".to_string()
        } else {
            session.team_id.clone()
        },
    ));
    rows.push(("API key", presence(!session.api_key.is_empty(), "set", "(not set)")));
    rows.push(("Token", presence(session.token.is_some(), "stored", "(none)")));
    rows.push((
        "Transport",
        format!(
            "{:?}",
            effective_transport_mode(&project.config, &project.overrides)?
        )
        .to_lowercase(),
    ));
    Ok(rows)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
