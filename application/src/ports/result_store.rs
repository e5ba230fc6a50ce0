//! Result persistence port
//!
//! A [`ResultStore`] writes a finished [`DebateRecord`] somewhere durable
//! and reports where it went.

use council_domain::DebateRecord;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Persists debate records.
pub trait ResultStore: Send + Sync {
    /// Save the record, returning every file written.
    fn save(&self, record: &DebateRecord) -> Result<Vec<PathBuf>, StoreError>;
}
