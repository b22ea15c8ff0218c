//! Workspace storage backend
//!
//! Every opened folder gets a directory under `workspaceStorage/<hash>/`
//! holding a `workspace.json` (which folder it belongs to) and a
//! `state.vscdb` (per-workspace UI state, including the ignore flag).

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use tracing::{debug, info, warn};

use super::folder_url::parse_folder_url;
use super::state_db::{self, STATE_DB_FILE};
use crate::backend::ProjectBackend;
use crate::project::ProjectRecord;

/// The workspace.json file structure
///
/// Multi-root workspaces carry `workspace` instead of `folder`.
#[derive(Debug, Deserialize)]
pub struct WorkspaceJson {
    pub folder: Option<String>,
    pub workspace: Option<String>,
}

impl WorkspaceJson {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read: {}", path.as_ref().display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse: {}", path.as_ref().display()))
    }
}

/// Projects backed by an editor's workspaceStorage directory
#[derive(Debug, Clone)]
pub struct WorkspaceStorage {
    root: PathBuf,
}

impl WorkspaceStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the storage root.
    ///
    /// Entries that cannot be turned into a project are logged and skipped;
    /// only an unreadable root is an error.
    pub fn scan(&self) -> Result<Vec<ProjectRecord>> {
        let mut projects = Vec::new();

        if !self.root.exists() {
            debug!(root = %self.root.display(), "workspace storage does not exist");
            return Ok(projects);
        }

        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("Failed to resolve: {}", self.root.display()))?;

        let mut entries: Vec<_> = fs::read_dir(&root)
            .with_context(|| format!("Failed to read: {}", root.display()))?
            .flatten()
            .collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            match read_project(&entry.path()) {
                Ok(Some(project)) => projects.push(project),
                Ok(None) => {}
                Err(e) => warn!("Skipping {}: {:#}", entry.path().display(), e),
            }
        }

        info!(count = projects.len(), root = %root.display(), "scanned workspace storage");
        Ok(projects)
    }

    /// Write every record's flag, one worker per database, in bounded batches
    pub fn write_flags(&self, changes: &[ProjectRecord]) -> Result<()> {
        self.write_flags_batched(changes, MAX_WRITERS)
    }

    /// Write flags with at most `batch` databases open at once
    fn write_flags_batched(&self, changes: &[ProjectRecord], batch: usize) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("Failed to resolve: {}", self.root.display()))?;

        let failures: Vec<String> = changes
            .chunks(batch.max(1))
            .flat_map(|chunk| write_chunk(&root, chunk))
            .collect();

        if !failures.is_empty() {
            bail!(
                "Failed to update {} of {} project(s): {}",
                failures.len(),
                changes.len(),
                failures.join("; ")
            );
        }

        Ok(())
    }
}

/// Upper bound on concurrent database writers
const MAX_WRITERS: usize = 16;

/// Write one chunk in parallel, returning a message per failed project
fn write_chunk(root: &Path, chunk: &[ProjectRecord]) -> Vec<String> {
    thread::scope(|scope| {
        let handles: Vec<_> = chunk
            .iter()
            .map(|project| {
                scope.spawn(move || {
                    check_owned(root, &project.storage_key)?;
                    state_db::write_ignore_flag(&project.storage_key, project.ignore)
                })
            })
            .collect();

        handles
            .into_iter()
            .zip(chunk)
            .filter_map(|(handle, project)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("worker panicked")));
                match result {
                    Ok(()) => {
                        debug!(
                            project = %project.name,
                            ignore = project.ignore,
                            "updated ignore flag"
                        );
                        None
                    }
                    Err(e) => {
                        warn!("Failed to update {}: {:#}", project.storage_key.display(), e);
                        Some(format!("{}: {:#}", project.name, e))
                    }
                }
            })
            .collect()
    })
}

/// Refuse to write outside the (canonical) storage root
fn check_owned(root: &Path, storage_key: &Path) -> Result<()> {
    if storage_key.parent() != Some(root) {
        bail!(
            "{} is not a workspace storage entry under {}",
            storage_key.display(),
            root.display()
        );
    }
    Ok(())
}

/// Build a project from one storage directory, or None if it isn't a single-folder workspace
fn read_project(workspace_dir: &Path) -> Result<Option<ProjectRecord>> {
    let workspace_json_path = workspace_dir.join("workspace.json");
    if !workspace_json_path.exists() {
        return Ok(None);
    }

    let workspace = WorkspaceJson::read(&workspace_json_path)?;

    let folder_url = match (workspace.folder, workspace.workspace) {
        (Some(url), _) => url,
        (None, Some(file)) => {
            debug!(workspace = %file, "skipping multi-root workspace");
            return Ok(None);
        }
        (None, None) => bail!("No 'folder' key in {}", workspace_json_path.display()),
    };

    let parsed = parse_folder_url(&folder_url)
        .ok_or_else(|| anyhow!("Invalid folder URL: {}", folder_url))?;

    if !workspace_dir.join(STATE_DB_FILE).exists() {
        bail!("No {} yet", STATE_DB_FILE);
    }

    let ignore = state_db::read_ignore_flag(workspace_dir)?;

    Ok(Some(
        ProjectRecord::new(parsed.path, workspace_dir, ignore).with_remote(parsed.remote),
    ))
}

/// Reveal a path in the platform file browser
pub fn reveal_path(path: &Path) -> Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    };

    let status = Command::new(opener)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to run {}", opener))?;

    // explorer.exe exits 1 even on success
    if !status.success() && !cfg!(windows) {
        bail!("{} exited with {} for {}", opener, status, path.display());
    }

    Ok(())
}

impl ProjectBackend for WorkspaceStorage {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.scan()
    }

    fn update_ignore_flags(&self, changes: &[ProjectRecord]) -> Result<()> {
        self.write_flags(changes)
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        reveal_path(path)
    }
}
