//! JSON transcript store.

use super::{file_stem, write_file};
use council_application::{ResultStore, StoreError};
use council_domain::DebateRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `debate_<stamp>.json` into a directory.
#[derive(Debug, Clone)]
pub struct JsonResultStore {
    directory: PathBuf,
}

impl JsonResultStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Read a transcript previously written by [`save`](ResultStore::save).
    pub fn load(path: &Path) -> Result<DebateRecord, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        DebateRecord::from_json(&json)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))
    }
}

impl ResultStore for JsonResultStore {
    fn save(&self, record: &DebateRecord) -> Result<Vec<PathBuf>, StoreError> {
        let json = record
            .to_json_pretty()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = write_file(
            &self.directory,
            &format!("{}.json", file_stem(record)),
            &json,
        )?;
        info!("Saved debate transcript to {}", path.display());
        Ok(vec![path])
    }
}
