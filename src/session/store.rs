//! Ordered project store

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::SessionError;
use crate::project::{ProjectEdit, ProjectRecord};

/// The project list as currently displayed, in load order
#[derive(Debug, Default, Clone)]
pub struct ProjectStore {
    records: Vec<ProjectRecord>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store. Leaves it untouched if `records` repeats a storage key.
    pub fn load(&mut self, records: Vec<ProjectRecord>) -> Result<(), SessionError> {
        if let Some(dup) = first_duplicate(&records) {
            return Err(SessionError::DuplicateProject(dup));
        }

        self.records = records;
        Ok(())
    }

    /// Mutate the supplied fields of the record at `storage_key` in place
    pub fn apply_local_edit(
        &mut self,
        storage_key: &Path,
        edit: &ProjectEdit,
    ) -> Result<&ProjectRecord, SessionError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.storage_key == storage_key)
            .ok_or_else(|| SessionError::UnknownProject(storage_key.to_path_buf()))?;

        edit.apply_to(record);
        Ok(record)
    }

    pub fn get(&self, storage_key: &Path) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.storage_key == storage_key)
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn first_duplicate(records: &[ProjectRecord]) -> Option<PathBuf> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .find(|r| !seen.insert(r.storage_key.as_path()))
        .map(|r| r.storage_key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<ProjectRecord> {
        vec![
            ProjectRecord::new("/src/Foo", "/ws/k1", false),
            ProjectRecord::new("/src/Bar", "/ws/k2", true),
            ProjectRecord::new("/src/baz", "/ws/k3", false),
        ]
    }

    #[test]
    fn test_load_keeps_order() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();

        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Foo", "Bar", "baz"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_twice_is_identical() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();
        let first = store.records().to_vec();

        store.load(sample()).unwrap();
        assert_eq!(store.records(), first.as_slice());
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();
        store
            .load(vec![ProjectRecord::new("/src/Qux", "/ws/k9", true)])
            .unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get(Path::new("/ws/k1")).is_none());
    }

    #[test]
    fn test_load_rejects_duplicate_keys() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();

        let mut dupes = sample();
        dupes.push(ProjectRecord::new("/elsewhere/Foo", "/ws/k1", true));

        let err = store.load(dupes).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateProject(ref k) if k == Path::new("/ws/k1")));
        assert!(err.is_consistency());
        assert_eq!(store.records(), sample().as_slice());
    }

    #[test]
    fn test_edit_changes_only_supplied_fields() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();

        for original in sample() {
            let edit = ProjectEdit::ignore(!original.ignore);
            let updated = store
                .apply_local_edit(&original.storage_key, &edit)
                .unwrap()
                .clone();

            assert_eq!(
                updated,
                ProjectRecord {
                    ignore: !original.ignore,
                    ..original
                }
            );
        }
    }

    #[test]
    fn test_edit_multiple_fields() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();

        let edit = ProjectEdit {
            name: Some("Renamed".to_string()),
            path: Some(PathBuf::from("/moved/Renamed")),
            ..ProjectEdit::default()
        };
        store.apply_local_edit(Path::new("/ws/k2"), &edit).unwrap();

        let record = store.get(Path::new("/ws/k2")).unwrap();
        assert_eq!(record.name, "Renamed");
        assert_eq!(record.path, PathBuf::from("/moved/Renamed"));
        assert!(record.ignore);
    }

    #[test]
    fn test_edit_does_not_reorder() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();
        store
            .apply_local_edit(Path::new("/ws/k3"), &ProjectEdit::ignore(true))
            .unwrap();

        let keys: Vec<_> = store
            .records()
            .iter()
            .map(|r| r.folder_id())
            .collect();
        assert_eq!(keys, vec!["k1", "k2", "k3"]);
    }

    #[test]
    fn test_edit_unknown_key_is_consistency_error() {
        let mut store = ProjectStore::new();
        store.load(sample()).unwrap();

        let err = store
            .apply_local_edit(Path::new("/ws/missing"), &ProjectEdit::ignore(true))
            .unwrap_err();
        assert!(err.is_consistency());
        assert_eq!(store.records(), sample().as_slice());
    }
}
