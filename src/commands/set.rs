//! Ignore/unignore commands - Set the flag for a batch of projects in one commit

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use super::utils;
use workspace_recs::backend::ProjectBackend;
use workspace_recs::session::{Session, SessionError};

/// Options for the ignore/unignore commands
pub struct SetOptions {
    /// Storage folder ids or storage paths
    pub ids: Vec<String>,
    /// Also select every project whose name contains this text
    pub filter: Option<String>,
    /// Target flag value
    pub ignore: bool,
    /// Show what would change without writing
    pub dry_run: bool,
}

/// Execute ignore/unignore, writing progress to `out`
pub fn execute<B: ProjectBackend, W: Write>(
    backend: B,
    options: SetOptions,
    out: &mut W,
) -> Result<()> {
    if options.ids.is_empty() && options.filter.is_none() {
        bail!("Specify at least one project id or --filter");
    }

    let mut session = Session::open(backend).context("Failed to list projects")?;

    let mut targets: Vec<PathBuf> = options
        .ids
        .iter()
        .map(|id| utils::resolve_project(&session, id))
        .collect::<Result<_>>()?;

    if let Some(filter) = &options.filter {
        session.set_filter_text(filter.as_str());
        targets.extend(session.visible().map(|p| p.storage_key.clone()));
        session.set_filter_text("");
    }

    let mut seen = HashSet::new();
    targets.retain(|key| seen.insert(key.clone()));

    for key in &targets {
        session.set_ignore(key, options.ignore)?;
    }

    let verb = if options.ignore { "ignore" } else { "unignore" };

    if !session.has_pending() {
        writeln!(
            out,
            "Nothing to do: {} selected project(s) already set to {}.",
            targets.len(),
            verb
        )?;
        return Ok(());
    }

    writeln!(out, "Will {} recommendations for:", verb)?;
    for project in session.pending() {
        writeln!(out, "  {} ({})", project.name, project.path.display())?;
    }

    if options.dry_run {
        writeln!(out, "\n{}", "(DRY-RUN) No changes made.".blue())?;
        return Ok(());
    }

    match session.submit() {
        Ok(count) => {
            writeln!(out, "\n{} {} project(s)", "Updated:".green(), count)?;
            Ok(())
        }
        Err(SessionError::RefreshAfterSubmit { submitted, source }) => {
            writeln!(out, "\n{} {} project(s)", "Updated:".green(), submitted)?;
            writeln!(out, "{} could not reload projects: {:#}", "Warning:".yellow(), source)?;
            Ok(())
        }
        Err(e) => Err(e).context("No changes were committed"),
    }
}
