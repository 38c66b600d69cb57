use std::sync::{Arc, Mutex};

use prep_core::model::{StatsError, StatsSnapshot};
use thiserror::Error;

/// Errors surfaced by snapshot repositories.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Snapshot(#[from] StatsError),

    #[error("repository lock poisoned: {0}")]
    Poisoned(String),
}

/// Where stats snapshots are kept between runs.
///
/// Repositories store whole snapshots; they never merge.
pub trait SnapshotRepository: Send + Sync {
    /// Load the stored snapshot, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read or holds an
    /// invalid snapshot.
    fn load(&self) -> Result<Option<StatsSnapshot>, StorageError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    fn save(&self, snapshot: &StatsSnapshot) -> Result<(), StorageError>;
}

/// In-memory repository for tests and throwaway runs.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    snapshot: Arc<Mutex<Option<StatsSnapshot>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(snapshot: StatsSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }
}

impl SnapshotRepository for InMemoryRepository {
    fn load(&self) -> Result<Option<StatsSnapshot>, StorageError> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &StatsSnapshot) -> Result<(), StorageError> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}
