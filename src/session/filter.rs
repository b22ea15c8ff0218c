//! Filtered view over the store

use crate::project::ProjectRecord;

/// Search text plus the "active only" switch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterView {
    query: String,
    active_only: bool,
}

impl FilterView {
    pub fn new(query: impl Into<String>, active_only: bool) -> Self {
        Self {
            query: query.into(),
            active_only,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_only(&self) -> bool {
        self.active_only
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_active_only(&mut self, active_only: bool) {
        self.active_only = active_only;
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && !self.active_only
    }

    /// Records matching this filter, in store order
    pub fn apply<'a>(
        &self,
        records: &'a [ProjectRecord],
    ) -> impl Iterator<Item = &'a ProjectRecord> + Clone + 'a {
        apply(records, &self.query, self.active_only)
    }
}

/// Lazily select records whose name contains `query` (case-insensitive) and,
/// with `active_only`, whose ignore flag is set.
///
/// The returned iterator can be cloned to walk the same selection again.
pub fn apply<'a>(
    records: &'a [ProjectRecord],
    query: &str,
    active_only: bool,
) -> impl Iterator<Item = &'a ProjectRecord> + Clone + 'a {
    let needle = query.to_lowercase();
    records.iter().filter(move |record| {
        let name_match = needle.is_empty() || record.name.to_lowercase().contains(&needle);
        let active_match = !active_only || record.ignore;
        name_match && active_match
    })
}
