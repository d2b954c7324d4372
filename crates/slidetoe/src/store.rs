//! Snapshot storage backends.

use derive_more::{Display, Error};
use slidetoe_engine::Snapshot;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Somewhere a snapshot can be read from and written to.
pub trait SnapshotStore {
    /// Loads the stored snapshot, `None` when nothing has been saved yet.
    ///
    /// A snapshot that fails to parse is reported as an error; callers treat
    /// that the same as a missing snapshot.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Stores the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist.
    #[instrument(skip(path))]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        if !self.path.exists() {
            debug!("No snapshot file");
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path)?;
        let snapshot = Snapshot::from_json(&text)
            .map_err(|e| StoreError::new(format!("Unreadable snapshot: {}", e)))?;
        info!("Snapshot loaded");
        Ok(Some(snapshot))
    }

    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = snapshot
            .to_json()
            .map_err(|e| StoreError::new(format!("Failed to encode snapshot: {}", e)))?;

        // Write beside the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Snapshot saved");
        Ok(())
    }
}

/// Keeps the snapshot in memory. Used with `--no-persist` and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Number of saves since creation.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}
