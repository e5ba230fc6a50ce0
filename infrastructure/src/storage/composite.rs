//! Fan-out over several result stores.

use council_application::{ResultStore, StoreError};
use council_domain::DebateRecord;
use std::path::PathBuf;

/// Saves to every inner store in order, stopping at the first failure.
#[derive(Default)]
pub struct CompositeResultStore {
    stores: Vec<Box<dyn ResultStore>>,
}

impl CompositeResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: impl ResultStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }

    pub fn push(&mut self, store: Box<dyn ResultStore>) {
        self.stores.push(store);
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl ResultStore for CompositeResultStore {
    fn save(&self, record: &DebateRecord) -> Result<Vec<PathBuf>, StoreError> {
        let mut saved = Vec::new();
        for store in &self.stores {
            saved.extend(store.save(record)?);
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::sample_record;
    use crate::storage::{JsonResultStore, MarkdownResultStore};

    #[test]
    fn test_saves_to_every_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CompositeResultStore::new()
            .with_store(JsonResultStore::new(dir.path()))
            .with_store(MarkdownResultStore::new(dir.path()));

        let paths = store.save(&sample_record()).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["debate_20240517_140309.json", "debate_20240517_140309.md"]
        );
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_empty_composite_saves_nothing() {
        let store = CompositeResultStore::new();
        assert!(store.is_empty());
        assert!(store.save(&sample_record()).unwrap().is_empty());
    }
}
