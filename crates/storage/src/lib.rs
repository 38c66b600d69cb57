#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;

pub use json_file::{DEFAULT_SNAPSHOT_FILE, JsonFileRepository};
pub use repository::{InMemoryRepository, SnapshotRepository, StorageError};
