use std::path::PathBuf;

/// Failures surfaced by session operations.
///
/// Backend failures carry the backend's error as their source; nothing in
/// the session is modified when one of them is returned, except where noted.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to fetch projects")]
    Fetch(#[source] anyhow::Error),

    #[error("failed to submit {pending} pending change(s)")]
    Submit {
        pending: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The batch was committed and the pending set cleared, but the store
    /// still holds the optimistic edits because the re-fetch failed.
    /// `source` is the backend error, or the `SessionError` the reload hit.
    #[error("submitted {submitted} change(s) but failed to reload projects")]
    RefreshAfterSubmit {
        submitted: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("nothing to submit")]
    NothingToSubmit,

    #[error("no project with storage key {}", .0.display())]
    UnknownProject(PathBuf),

    #[error("duplicate storage key {}", .0.display())]
    DuplicateProject(PathBuf),

    #[error("failed to open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl SessionError {
    /// Caller contract violations, as opposed to recoverable backend failures
    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::UnknownProject(_) | Self::DuplicateProject(_))
    }
}
