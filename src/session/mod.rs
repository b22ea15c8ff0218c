//! Editing session: the project list, its pending changes, and the view over it
//!
//! Toggles are applied to the store immediately (so the displayed flag is
//! always current) and recorded in the [`ChangeTracker`] until they are
//! submitted or discarded by a reload.

pub mod coordinator;
mod error;
pub mod filter;
pub mod store;
pub mod tracker;

#[cfg(test)]
pub(crate) mod fake;

pub use coordinator::SubmissionCoordinator;
pub use error::SessionError;
pub use filter::FilterView;
pub use store::ProjectStore;
pub use tracker::{ChangeTracker, Toggled};

use std::path::Path;
use tracing::debug;

use crate::backend::ProjectBackend;
use crate::project::{ProjectEdit, ProjectRecord};

/// One user's working state against one backend
#[derive(Debug)]
pub struct Session<B> {
    store: ProjectStore,
    tracker: ChangeTracker,
    filter: FilterView,
    coordinator: SubmissionCoordinator<B>,
}

impl<B: ProjectBackend> Session<B> {
    /// An empty session; call [`Session::reload`] to populate it
    pub fn new(backend: B) -> Self {
        Self {
            store: ProjectStore::new(),
            tracker: ChangeTracker::new(),
            filter: FilterView::default(),
            coordinator: SubmissionCoordinator::new(backend),
        }
    }

    /// Create a session and run the initial fetch
    pub fn open(backend: B) -> Result<Self, SessionError> {
        let mut session = Self::new(backend);
        session.reload()?;
        Ok(session)
    }

    /// Fetch the project list, discarding pending edits.
    ///
    /// On failure the store and pending set are left as they were.
    pub fn reload(&mut self) -> Result<usize, SessionError> {
        let count = self.coordinator.refresh(&mut self.store)?;
        if !self.tracker.is_empty() {
            debug!(discarded = self.tracker.len(), "discarding pending changes");
            self.tracker.clear();
        }
        Ok(count)
    }

    /// Flip a project's ignore flag and record the toggle
    pub fn toggle_ignore(&mut self, storage_key: &Path) -> Result<Toggled, SessionError> {
        let current = self
            .store
            .get(storage_key)
            .ok_or_else(|| SessionError::UnknownProject(storage_key.to_path_buf()))?
            .ignore;

        let updated = self
            .store
            .apply_local_edit(storage_key, &ProjectEdit::ignore(!current))?
            .clone();
        Ok(self.tracker.toggle(updated))
    }

    /// Toggle only if the flag differs from `ignore`; returns whether it did
    pub fn set_ignore(&mut self, storage_key: &Path, ignore: bool) -> Result<bool, SessionError> {
        let record = self
            .store
            .get(storage_key)
            .ok_or_else(|| SessionError::UnknownProject(storage_key.to_path_buf()))?;
        if record.ignore == ignore {
            return Ok(false);
        }
        self.toggle_ignore(storage_key)?;
        Ok(true)
    }

    /// Commit the pending set; see [`SubmissionCoordinator::submit`]
    pub fn submit(&mut self) -> Result<usize, SessionError> {
        self.coordinator.submit(&mut self.store, &mut self.tracker)
    }

    /// Reveal a path through the backend. Never touches session state.
    pub fn open_path(&self, path: &Path) -> Result<(), SessionError> {
        self.coordinator
            .backend()
            .open_path(path)
            .map_err(|source| SessionError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn filter(&self) -> &FilterView {
        &self.filter
    }

    pub fn set_filter_text(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn set_active_only(&mut self, active_only: bool) {
        self.filter.set_active_only(active_only);
    }

    pub fn toggle_active_only(&mut self) -> bool {
        let active_only = !self.filter.active_only();
        self.filter.set_active_only(active_only);
        active_only
    }

    /// The filtered rows, derived from the current store
    pub fn visible(&self) -> impl Iterator<Item = &ProjectRecord> + Clone + '_ {
        self.filter.apply(self.store.records())
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        self.store.records()
    }

    pub fn get(&self, storage_key: &Path) -> Option<&ProjectRecord> {
        self.store.get(storage_key)
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &ProjectRecord> + Clone {
        self.tracker.values()
    }

    pub fn has_pending(&self) -> bool {
        !self.tracker.is_empty()
    }

    pub fn is_pending(&self, storage_key: &Path) -> bool {
        self.tracker.contains(storage_key)
    }

    pub fn backend(&self) -> &B {
        self.coordinator.backend()
    }
}
