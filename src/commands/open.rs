//! Open command - Reveal a project folder or its workspace storage

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use super::utils;
use workspace_recs::backend::ProjectBackend;
use workspace_recs::session::Session;

/// Execute the open command, returning the path that was opened
pub fn execute<B: ProjectBackend>(backend: B, id: &str, storage: bool) -> Result<PathBuf> {
    let session = Session::open(backend).context("Failed to list projects")?;
    let key = utils::resolve_project(&session, id)?;

    let Some(project) = session.get(&key) else {
        bail!("No project with id: {}", id);
    };

    let target = match (&project.remote, storage) {
        (_, true) => project.storage_key.clone(),
        (Some(remote), false) => bail!(
            "{} lives on {}; use --storage to open its workspace storage instead",
            project.name,
            remote
        ),
        (None, false) => project.path.clone(),
    };

    session.open_path(&target)?;
    Ok(target)
}
