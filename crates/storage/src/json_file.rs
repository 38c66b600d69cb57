use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use prep_core::model::StatsSnapshot;
use tracing::debug;

use crate::repository::{SnapshotRepository, StorageError};

/// File name used when no stats path is configured.
pub const DEFAULT_SNAPSHOT_FILE: &str = "az_mortgage_broker_stats.json";

/// Stores the snapshot as a pretty-printed JSON document.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate a snapshot document from any path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read and
    /// `StorageError::Snapshot` if its contents are not a valid snapshot.
    pub fn read_snapshot(path: &Path) -> Result<StatsSnapshot, StorageError> {
        let text = fs::read_to_string(path)?;
        let snapshot = StatsSnapshot::from_json(&text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Write a snapshot document to any path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or writing fails.
    pub fn write_snapshot(path: &Path, snapshot: &StatsSnapshot) -> Result<(), StorageError> {
        let text = snapshot.to_json_pretty()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl SnapshotRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<StatsSnapshot>, StorageError> {
        match Self::read_snapshot(&self.path) {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), "loaded stats snapshot");
                Ok(Some(snapshot))
            }
            Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stats snapshot yet");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, snapshot: &StatsSnapshot) -> Result<(), StorageError> {
        Self::write_snapshot(&self.path, snapshot)?;
        debug!(
            path = %self.path.display(),
            history = snapshot.quiz_history.len(),
            "saved stats snapshot"
        );
        Ok(())
    }
}
