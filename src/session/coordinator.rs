//! Fetching and committing through the backend

use tracing::{debug, info, warn};

use super::{ChangeTracker, ProjectStore, SessionError};
use crate::backend::ProjectBackend;

/// Moves data between the backend and the in-memory store/tracker.
///
/// Neither the store nor the tracker is modified unless the backend call
/// they depend on succeeded.
#[derive(Debug)]
pub struct SubmissionCoordinator<B> {
    backend: B,
}

impl<B: ProjectBackend> SubmissionCoordinator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the store with a fresh listing
    pub fn refresh(&self, store: &mut ProjectStore) -> Result<usize, SessionError> {
        let records = self
            .backend
            .list_projects()
            .map_err(SessionError::Fetch)?;
        store.load(records)?;
        debug!(count = store.len(), "loaded projects");
        Ok(store.len())
    }

    /// Send the pending set; on success clear it and reload the store.
    ///
    /// Returns how many changes were committed.
    pub fn submit(
        &self,
        store: &mut ProjectStore,
        tracker: &mut ChangeTracker,
    ) -> Result<usize, SessionError> {
        if tracker.is_empty() {
            return Err(SessionError::NothingToSubmit);
        }

        let changes = tracker.to_vec();
        let submitted = changes.len();

        if let Err(source) = self.backend.update_ignore_flags(&changes) {
            warn!(pending = submitted, "submit failed: {:#}", source);
            return Err(SessionError::Submit {
                pending: submitted,
                source,
            });
        }

        tracker.clear();
        info!(submitted, "committed pending changes");

        // The batch is committed; any reload failure must say so
        self.refresh(store).map_err(|e| {
            let source = match e {
                SessionError::Fetch(source) => source,
                other => anyhow::Error::new(other),
            };
            SessionError::RefreshAfterSubmit { submitted, source }
        })?;

        Ok(submitted)
    }
}
