//! In-memory backend for session tests

use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::backend::ProjectBackend;
use crate::project::ProjectRecord;

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub projects: RefCell<Vec<ProjectRecord>>,
    pub submissions: RefCell<Vec<Vec<ProjectRecord>>>,
    pub opened: RefCell<Vec<PathBuf>>,
    pub fail_list: Cell<bool>,
    pub fail_update: Cell<bool>,
    pub fail_open: Cell<bool>,
    /// After an update, list every changed record twice
    pub duplicate_after_update: Cell<bool>,
}

impl FakeBackend {
    pub fn with_projects(projects: Vec<ProjectRecord>) -> Self {
        Self {
            projects: RefCell::new(projects),
            ..Self::default()
        }
    }

    /// Stored flag for a key, as the system of record sees it
    pub fn stored_flag(&self, storage_key: &str) -> Option<bool> {
        self.projects
            .borrow()
            .iter()
            .find(|p| p.storage_key == Path::new(storage_key))
            .map(|p| p.ignore)
    }
}

impl ProjectBackend for FakeBackend {
    fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        if self.fail_list.get() {
            bail!("listing unavailable");
        }
        Ok(self.projects.borrow().clone())
    }

    fn update_ignore_flags(&self, changes: &[ProjectRecord]) -> Result<()> {
        if self.fail_update.get() {
            bail!("database is locked");
        }
        self.submissions.borrow_mut().push(changes.to_vec());
        let mut projects = self.projects.borrow_mut();
        for change in changes {
            if let Some(p) = projects.iter_mut().find(|p| p.same_project(change)) {
                p.ignore = change.ignore;
            }
        }
        if self.duplicate_after_update.get() {
            projects.extend(changes.iter().cloned());
        }
        Ok(())
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        if self.fail_open.get() {
            bail!("no opener");
        }
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Foo (k1, not ignored) and Bar (k2, ignored)
pub fn foo_bar() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord::new("/src/Foo", "k1", false),
        ProjectRecord::new("/src/Bar", "k2", true),
    ]
}
