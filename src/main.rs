//! workspace-recs: review and toggle VS Code workspace recommendation prompts
//!
//! Reads and writes the editor's local workspace storage. Close the editor
//! before writing; it caches state.vscdb and may overwrite changes on exit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use workspace_recs::config::{self, Editor};
use workspace_recs::vscode::WorkspaceStorage;

mod commands;

#[derive(Parser)]
#[command(name = "workspace-recs")]
#[command(about = "Review and toggle workspace recommendation prompts", long_about = None)]
#[command(version)]
struct Cli {
    /// Editor whose workspace storage to use
    #[arg(long, global = true, value_enum, default_value_t = Editor::Code, env = "WORKSPACE_RECS_EDITOR")]
    editor: Editor,

    /// Use this workspaceStorage directory instead of the editor's default
    #[arg(long, global = true, env = "WORKSPACE_RECS_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// More log output (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects and whether their recommendations are ignored
    List {
        /// Only projects whose recommendations are ignored
        #[arg(long, short)]
        active: bool,

        /// Case-insensitive substring of the project name
        #[arg(long, short)]
        filter: Option<String>,

        /// Show workspace ID for each project (use with ignore/unignore/open)
        #[arg(long)]
        with_id: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ignore workspace recommendations for the selected projects
    Ignore {
        /// Workspace IDs (see `list --with-id`) or storage paths
        ids: Vec<String>,

        /// Also select every project whose name contains this text
        #[arg(long, short)]
        filter: Option<String>,

        /// Show what would be done without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Stop ignoring workspace recommendations for the selected projects
    Unignore {
        /// Workspace IDs (see `list --with-id`) or storage paths
        ids: Vec<String>,

        /// Also select every project whose name contains this text
        #[arg(long, short)]
        filter: Option<String>,

        /// Show what would be done without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Open a project folder in the file browser
    Open {
        /// Workspace ID or storage path
        id: String,

        /// Open the workspace storage directory instead
        #[arg(long)]
        storage: bool,
    },

    /// Interactive session: filter, toggle, then submit in one batch
    Shell,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("WORKSPACE_RECS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("workspace_recs={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let storage_dir = config::resolve_storage_dir(cli.editor, cli.storage_dir)?;
    let backend = WorkspaceStorage::new(storage_dir);
    tracing::debug!(root = %backend.root().display(), "using workspace storage");

    match cli.command {
        Commands::List {
            active,
            filter,
            with_id,
            json,
        } => {
            let options = commands::list::ListOptions {
                active,
                filter,
                with_id,
                json,
            };
            let output = commands::list::execute(&backend, options)?;
            println!("{}", output);
        }

        Commands::Ignore {
            ids,
            filter,
            dry_run,
        } => {
            if dry_run {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            let options = commands::set::SetOptions {
                ids,
                filter,
                ignore: true,
                dry_run,
            };
            commands::set::execute(&backend, options, &mut io::stdout())?;
        }

        Commands::Unignore {
            ids,
            filter,
            dry_run,
        } => {
            if dry_run {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            let options = commands::set::SetOptions {
                ids,
                filter,
                ignore: false,
                dry_run,
            };
            commands::set::execute(&backend, options, &mut io::stdout())?;
        }

        Commands::Open { id, storage } => {
            let opened = commands::open::execute(&backend, &id, storage)
                .with_context(|| format!("Failed to open project {}", id))?;
            println!("{} {}", "Opened:".green(), opened.display());
        }

        Commands::Shell => {
            commands::shell::execute(&backend, io::stdin().lock(), &mut io::stdout())?;
        }
    }

    Ok(())
}
