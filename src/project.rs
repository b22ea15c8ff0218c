//! Project records shared by the session core and the storage backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Remote connection type for vscode-remote:// URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteType {
    Tunnel,
    SshRemote,
    DevContainer,
    Wsl,
    Unknown(String),
}

impl RemoteType {
    pub fn parse(s: &str) -> Self {
        match s {
            "tunnel" => Self::Tunnel,
            "ssh-remote" => Self::SshRemote,
            "dev-container" => Self::DevContainer,
            "wsl" => Self::Wsl,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for RemoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tunnel => write!(f, "tunnel"),
            Self::SshRemote => write!(f, "ssh"),
            Self::DevContainer => write!(f, "container"),
            Self::Wsl => write!(f, "wsl"),
            Self::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// Remote connection info for vscode-remote:// URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInfo {
    pub remote_type: RemoteType,
    /// Remote host/name
    pub name: String,
}

impl fmt::Display for RemoteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.remote_type, self.name)
    }
}

/// A project discovered in workspace storage.
///
/// `storage_key` is the record's identity; use [`ProjectRecord::same_project`]
/// to compare projects. `==` compares whole snapshots, so a record before and
/// after an edit is the same project but not equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Display label (final component of the project path), not unique
    #[serde(rename = "projectName")]
    pub name: String,

    /// The project folder, as recorded by the editor
    #[serde(rename = "projectPath")]
    pub path: PathBuf,

    /// Absolute path of the workspace storage directory
    #[serde(rename = "vscodeWorkspaceStoragePath")]
    pub storage_key: PathBuf,

    /// Whether the workspace recommendations prompt is suppressed
    #[serde(rename = "workspaceRecommendationsIgnore")]
    pub ignore: bool,

    /// Remote connection info (None for local projects)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteInfo>,
}

impl ProjectRecord {
    pub fn new(path: impl Into<PathBuf>, storage_key: impl Into<PathBuf>, ignore: bool) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            storage_key: storage_key.into(),
            ignore,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Option<RemoteInfo>) -> Self {
        self.remote = remote;
        self
    }

    /// Whether both records describe the same project
    pub fn same_project(&self, other: &ProjectRecord) -> bool {
        self.storage_key == other.storage_key
    }

    /// The storage directory name (a hash), used on the command line
    pub fn folder_id(&self) -> String {
        self.storage_key
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Final path component, or the whole path when it has none (e.g. `/`)
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Partial update for a [`ProjectRecord`]; `None` fields are left untouched.
///
/// There is no storage key field: identity never changes in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
    pub ignore: Option<bool>,
    pub remote: Option<Option<RemoteInfo>>,
}

impl ProjectEdit {
    pub fn ignore(value: bool) -> Self {
        Self {
            ignore: Some(value),
            ..Self::default()
        }
    }

    /// Apply the supplied fields to `record`
    pub fn apply_to(&self, record: &mut ProjectRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(path) = &self.path {
            record.path = path.clone();
        }
        if let Some(ignore) = self.ignore {
            record.ignore = ignore;
        }
        if let Some(remote) = &self.remote {
            record.remote = remote.clone();
        }
    }
}
