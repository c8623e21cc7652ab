use crate::culprit_analysis::domain::GraphStore;
use crate::shared::Result;
use std::path::Path;

/// SnapshotRepository port for persisting a built dependency graph
///
/// A snapshot is an all-or-nothing copy of a `GraphStore`; there is no
/// incremental update.
pub trait SnapshotRepository: Send + Sync {
    /// Loads a previously saved graph
    ///
    /// # Errors
    /// Returns `CulpritError::Storage` if the snapshot is missing, unreadable
    /// or corrupt.
    fn load(&self, handle: &Path) -> Result<GraphStore>;

    /// Writes the full graph, replacing any snapshot at `handle`
    ///
    /// # Errors
    /// Returns `CulpritError::Storage` on I/O failure.
    fn save(&self, store: &GraphStore, handle: &Path) -> Result<()>;
}
