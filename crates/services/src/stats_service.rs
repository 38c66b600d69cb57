use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use storage::{JsonFileRepository, SnapshotRepository};

use crate::error::StatsServiceError;
use crate::quiz::QuizController;

/// Moves the controller's stats in and out of a snapshot repository and
/// user-chosen JSON files.
#[derive(Clone)]
pub struct StatsService {
    repo: Arc<dyn SnapshotRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SnapshotRepository>) -> Self {
        Self { repo }
    }

    /// Load the saved snapshot into `controller`.
    ///
    /// Returns `false` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` if the repository cannot be read or holds an
    /// invalid snapshot; the controller's stats are unchanged in that case.
    pub fn restore(&self, controller: &mut QuizController) -> Result<bool, StatsServiceError> {
        let Some(snapshot) = self.repo.load()? else {
            return Ok(false);
        };
        controller.import_stats(snapshot)?;
        Ok(true)
    }

    /// Save the controller's current stats.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` if the write fails.
    pub fn persist(&self, controller: &QuizController) -> Result<(), StatsServiceError> {
        self.repo.save(&controller.export_stats()).inspect_err(|e| {
            warn!(error = %e, "failed to persist stats");
        })?;
        Ok(())
    }

    /// Replace the controller's stats with the snapshot in `path`, then persist.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` if the file is unreadable or invalid (stats
    /// are untouched), or if persisting the imported stats fails.
    pub fn import_file(
        &self,
        path: &Path,
        controller: &mut QuizController,
    ) -> Result<(), StatsServiceError> {
        let snapshot = JsonFileRepository::read_snapshot(path)?;
        controller.import_stats(snapshot)?;
        self.persist(controller)?;
        info!(path = %path.display(), "stats imported from file");
        Ok(())
    }

    /// Write the controller's stats to `path` as a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` if the file cannot be written.
    pub fn export_file(
        &self,
        path: &Path,
        controller: &QuizController,
    ) -> Result<(), StatsServiceError> {
        JsonFileRepository::write_snapshot(path, &controller.export_stats())?;
        info!(path = %path.display(), "stats exported to file");
        Ok(())
    }
}
