//! The boundary between the session core and whatever owns project storage

use anyhow::Result;
use std::path::Path;

use crate::project::ProjectRecord;

/// Operations the session needs from the system of record.
///
/// Implementations may block; the session never calls them concurrently.
pub trait ProjectBackend {
    /// Enumerate known projects with their current ignore flags
    fn list_projects(&self) -> Result<Vec<ProjectRecord>>;

    /// Persist each record's ignore flag by storage key.
    ///
    /// Must be idempotent: resubmitting the same records only reasserts
    /// the same values.
    fn update_ignore_flags(&self, changes: &[ProjectRecord]) -> Result<()>;

    /// Ask the host environment to reveal a path
    fn open_path(&self, path: &Path) -> Result<()>;
}

impl<B: ProjectBackend + ?Sized> ProjectBackend for &B {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        (**self).list_projects()
    }

    fn update_ignore_flags(&self, changes: &[ProjectRecord]) -> Result<()> {
        (**self).update_ignore_flags(changes)
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        (**self).open_path(path)
    }
}
