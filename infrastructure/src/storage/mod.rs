//! Debate result persistence.
//!
//! Every store implements the [`ResultStore`](council_application::ResultStore)
//! port. Files written for the same debate share one stem,
//! `debate_<YYYYmmdd_HHMMSS>`, derived from the record's timestamp.

mod composite;
mod json_store;
mod markdown;

pub use composite::CompositeResultStore;
pub use json_store::JsonResultStore;
pub use markdown::{MarkdownRenderer, MarkdownResultStore};

use chrono::{DateTime, Local};
use council_application::StoreError;
use council_domain::DebateRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// File stem shared by every artifact of `record`.
///
/// Falls back to the current local time when the timestamp does not parse.
pub fn file_stem(record: &DebateRecord) -> String {
    let stamp = DateTime::parse_from_rfc3339(record.timestamp())
        .map(|t| t.format("%Y%m%d_%H%M%S").to_string())
        .unwrap_or_else(|_| Local::now().format("%Y%m%d_%H%M%S").to_string());
    format!("debate_{}", stamp)
}

/// Create `directory` (if needed) and write `contents` to `file_name` in it.
pub(crate) fn write_file(
    directory: &Path,
    file_name: &str,
    contents: &str,
) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(directory).map_err(|source| StoreError::Io {
        path: directory.to_path_buf(),
        source,
    })?;

    let path = directory.join(file_name);
    fs::write(&path, contents).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_uses_record_timestamp() {
        let record = test_support::sample_record();
        assert_eq!(file_stem(&record), "debate_20240517_140309");
    }

    #[test]
    fn test_file_stem_falls_back_to_now() {
        let record = DebateRecord::new("t", "not a timestamp", vec![], vec![], "");
        let stem = file_stem(&record);
        assert!(stem.starts_with("debate_"));
        assert_eq!(stem.len(), "debate_YYYYmmdd_HHMMSS".len());
    }

    #[test]
    fn test_write_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = write_file(&nested, "x.txt", "hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
