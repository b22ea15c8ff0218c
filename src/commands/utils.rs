//! Shared utilities for commands

use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use std::path::{Path, PathBuf};

use workspace_recs::backend::ProjectBackend;
use workspace_recs::project::ProjectRecord;
use workspace_recs::session::Session;

/// Table columns shared by `list` and the shell
pub struct TableOptions {
    /// Prefix each row with its position in the view
    pub numbered: bool,
    /// Show the storage folder id
    pub with_id: bool,
}

/// Render projects as a table; `pending` marks rows with unsubmitted toggles
pub fn project_table<'a>(
    rows: impl Iterator<Item = (&'a ProjectRecord, bool)>,
    options: &TableOptions,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![];
    if options.numbered {
        header.push(Cell::new("#"));
    }
    header.push(Cell::new("Ignore"));
    header.push(Cell::new("Name"));
    if options.with_id {
        header.push(Cell::new("ID"));
    }
    header.push(Cell::new("Remote"));
    header.push(Cell::new("Path"));
    table.set_header(header);

    for (index, (project, pending)) in rows.enumerate() {
        let flag = match (project.ignore, pending) {
            (true, false) => "[x]",
            (false, false) => "[ ]",
            (true, true) => "[x]*",
            (false, true) => "[ ]*",
        };
        let remote_str = project
            .remote
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut row = vec![];
        if options.numbered {
            row.push(Cell::new(index + 1));
        }
        row.push(Cell::new(flag));
        row.push(Cell::new(&project.name));
        if options.with_id {
            row.push(Cell::new(project.folder_id()));
        }
        row.push(Cell::new(remote_str));
        row.push(Cell::new(project.path.to_string_lossy()));
        table.add_row(row);
    }

    table
}

/// Resolve a command-line project id to its storage key.
///
/// Accepts the storage folder id (directory name) or the full storage path.
pub fn resolve_project<B: ProjectBackend>(session: &Session<B>, id: &str) -> Result<PathBuf> {
    let by_path = Path::new(id);
    if let Some(project) = session.get(by_path) {
        return Ok(project.storage_key.clone());
    }

    let matches: Vec<_> = session
        .projects()
        .iter()
        .filter(|p| p.folder_id() == id)
        .collect();

    match matches.as_slice() {
        [project] => Ok(project.storage_key.clone()),
        [] => bail!("No project with id: {}", id),
        _ => bail!("Ambiguous project id: {}", id),
    }
}
