//! List command - Show projects and their ignore flags

use anyhow::{Context, Result};

use super::utils::{self, TableOptions};
use workspace_recs::backend::ProjectBackend;
use workspace_recs::session::Session;

/// Options for the list command
pub struct ListOptions {
    /// Only projects whose recommendations are ignored
    pub active: bool,
    /// Case-insensitive substring of the project name
    pub filter: Option<String>,
    /// Show the storage folder id for each project
    pub with_id: bool,
    /// Emit JSON instead of a table
    pub json: bool,
}

/// Execute the list command and return formatted output
pub fn execute<B: ProjectBackend>(backend: B, options: ListOptions) -> Result<String> {
    let mut session = Session::open(backend).context("Failed to list projects")?;
    session.set_filter_text(options.filter.unwrap_or_default());
    session.set_active_only(options.active);

    if options.json {
        let visible: Vec<_> = session.visible().collect();
        return serde_json::to_string_pretty(&visible).context("Failed to serialize projects");
    }

    let total_count = session.projects().len();
    let shown = session.visible().count();

    let table = utils::project_table(
        session.visible().map(|p| (p, false)),
        &TableOptions {
            numbered: false,
            with_id: options.with_id,
        },
    );

    let mut output = table.to_string();
    if shown < total_count {
        output.push_str(&format!(
            "\n\nShowing {} of {} projects",
            shown, total_count
        ));
    } else {
        output.push_str(&format!("\n\n{} projects found", total_count));
    }

    Ok(output)
}
