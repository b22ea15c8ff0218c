//! Pending-change tracking
//!
//! Membership follows toggle parity: each toggle of a storage key flips its
//! presence in the pending set. The tracker never compares against the
//! value last fetched. For the boolean ignore flag this is the same as
//! "differs from base", since two toggles restore the fetched value; that
//! equivalence does not hold for non-boolean fields.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::project::ProjectRecord;

/// Whether a toggle added or cancelled a pending change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Pending,
    Cancelled,
}

#[derive(Debug, Default, Clone)]
pub struct ChangeTracker {
    pending: IndexMap<PathBuf, ProjectRecord>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a post-edit snapshot, or cancel the pending entry for its key
    pub fn toggle(&mut self, record: ProjectRecord) -> Toggled {
        if self.pending.shift_remove(&record.storage_key).is_some() {
            Toggled::Cancelled
        } else {
            self.pending.insert(record.storage_key.clone(), record);
            Toggled::Pending
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Pending snapshots in the order their current entries were added
    pub fn values(&self) -> impl ExactSizeIterator<Item = &ProjectRecord> + Clone {
        self.pending.values()
    }

    /// The change-set to submit
    pub fn to_vec(&self) -> Vec<ProjectRecord> {
        self.pending.values().cloned().collect()
    }

    pub fn contains(&self, storage_key: &Path) -> bool {
        self.pending.contains_key(storage_key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
