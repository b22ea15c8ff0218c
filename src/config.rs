//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// Editors that share the VS Code workspace storage layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Editor {
    /// Visual Studio Code
    #[default]
    Code,
    /// Visual Studio Code - Insiders
    Insiders,
    /// VSCodium
    Vscodium,
    /// Cursor
    Cursor,
}

impl Editor {
    /// Name of the editor's directory under the platform config dir
    pub fn app_dir_name(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Insiders => "Code - Insiders",
            Self::Vscodium => "VSCodium",
            Self::Cursor => "Cursor",
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.app_dir_name())
    }
}

/// Get the editor's workspace storage directory
/// - macOS: ~/Library/Application Support/<Editor>/User/workspaceStorage/
/// - Linux: ~/.config/<Editor>/User/workspaceStorage/
/// - Windows: %APPDATA%/<Editor>/User/workspaceStorage/
pub fn workspace_storage_dir(editor: Editor) -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join(editor.app_dir_name())
            .join("User")
            .join("workspaceStorage"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = dirs::config_dir().context("Could not determine AppData directory")?;
        Ok(appdata
            .join(editor.app_dir_name())
            .join("User")
            .join("workspaceStorage"))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config
            .join(editor.app_dir_name())
            .join("User")
            .join("workspaceStorage"))
    }
}

/// Resolve the storage root, preferring an explicit override
pub fn resolve_storage_dir(editor: Editor, override_dir: Option<PathBuf>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir),
        None => workspace_storage_dir(editor)
            .with_context(|| format!("Failed to locate {} workspace storage", editor)),
    }
}
