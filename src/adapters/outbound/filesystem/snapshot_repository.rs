use crate::culprit_analysis::domain::{DependencyRecord, GraphStore, PackageId};
use crate::ports::outbound::SnapshotRepository;
use crate::shared::error::CulpritError;
use crate::shared::security::{ensure_not_symlink, ensure_readable_file, MAX_SNAPSHOT_SIZE};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Current snapshot schema version
const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout: the direct-import map and the transitive-dependency map
/// are stored side by side, keyed by package identifier.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    version: u32,
    root: PackageId,
    built_at: DateTime<Utc>,
    imports: BTreeMap<PackageId, Vec<PackageId>>,
    deps: BTreeMap<PackageId, BTreeSet<PackageId>>,
}

impl SnapshotDocument {
    fn from_store(store: &GraphStore) -> Self {
        let mut imports = BTreeMap::new();
        let mut deps = BTreeMap::new();
        for (package, record) in store.records() {
            imports.insert(package.clone(), record.imports.clone());
            deps.insert(package.clone(), record.transitive_deps.clone());
        }
        Self {
            version: SNAPSHOT_VERSION,
            root: store.root().clone(),
            built_at: store.built_at(),
            imports,
            deps,
        }
    }

    fn into_store(self, handle: &Path) -> Result<GraphStore> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CulpritError::storage(
                handle,
                format!(
                    "Unsupported snapshot version {} (expected {})",
                    self.version, SNAPSHOT_VERSION
                ),
            )
            .into());
        }

        if !self.imports.keys().eq(self.deps.keys()) {
            return Err(CulpritError::storage(
                handle,
                "Corrupt snapshot: the imports and deps maps describe different packages",
            )
            .into());
        }

        if !self.imports.contains_key(&self.root) {
            return Err(CulpritError::storage(
                handle,
                format!("Corrupt snapshot: no record for root package {}", self.root),
            )
            .into());
        }

        let mut store = GraphStore::with_built_at(self.root, self.built_at);
        let mut deps = self.deps;
        for (package, imports) in self.imports {
            let transitive_deps = deps.remove(&package).unwrap_or_default();
            store.insert(package, DependencyRecord::new(imports, transitive_deps));
        }
        Ok(store)
    }
}

/// JsonSnapshotRepository adapter storing the graph as a JSON file
///
/// Saves are atomic: the document is written to a temporary file next to
/// the target and renamed over it, so an interrupted save never leaves a
/// half-written snapshot behind.
pub struct JsonSnapshotRepository {
    max_size: u64,
}

impl JsonSnapshotRepository {
    pub fn new() -> Self {
        Self {
            max_size: MAX_SNAPSHOT_SIZE,
        }
    }

    #[cfg(test)]
    fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }
}

impl Default for JsonSnapshotRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotRepository for JsonSnapshotRepository {
    fn load(&self, handle: &Path) -> Result<GraphStore> {
        let size = ensure_readable_file(handle, self.max_size)?;
        debug!(path = %handle.display(), bytes = size, "loading graph snapshot");

        let content = fs::read(handle)
            .map_err(|e| CulpritError::storage(handle, format!("Failed to read snapshot: {}", e)))?;

        let document: SnapshotDocument = serde_json::from_slice(&content)
            .map_err(|e| CulpritError::storage(handle, format!("Corrupt snapshot: {}", e)))?;

        let store = document.into_store(handle)?;

        let dangling = store.dangling_imports();
        if !dangling.is_empty() {
            warn!(
                path = %handle.display(),
                count = dangling.len(),
                "snapshot has imports without records; searches through them will fail"
            );
        }

        Ok(store)
    }

    fn save(&self, store: &GraphStore, handle: &Path) -> Result<()> {
        ensure_not_symlink(handle)?;

        let parent = match handle.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| {
            CulpritError::storage(handle, format!("Failed to create snapshot directory: {}", e))
        })?;

        let document = SnapshotDocument::from_store(store);
        let temp = NamedTempFile::new_in(parent).map_err(|e| {
            CulpritError::storage(handle, format!("Failed to create temporary file: {}", e))
        })?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &document).map_err(|e| {
                CulpritError::storage(handle, format!("Failed to serialize snapshot: {}", e))
            })?;
            writer
                .flush()
                .map_err(|e| CulpritError::storage(handle, format!("Failed to write snapshot: {}", e)))?;
        }

        temp.persist(handle)
            .map_err(|e| CulpritError::storage(handle, format!("Failed to replace snapshot: {}", e.error)))?;

        debug!(path = %handle.display(), packages = store.len(), "graph snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(s: &str) -> PackageId {
        PackageId::new(s).unwrap()
    }

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new(id("A"));
        store.insert(
            id("A"),
            DependencyRecord::new(
                vec![id("C"), id("B")],
                [id("B"), id("C"), id("D"), id("Target")].into_iter().collect(),
            ),
        );
        store.insert(
            id("B"),
            DependencyRecord::new(vec![id("D")], [id("D"), id("Target")].into_iter().collect()),
        );
        store.insert(id("C"), DependencyRecord::leaf());
        store.insert(
            id("D"),
            DependencyRecord::new(vec![id("Target")], [id("Target")].into_iter().collect()),
        );
        store.insert(id("Target"), DependencyRecord::leaf());
        store
    }

    fn assert_storage_error(err: &anyhow::Error, needle: &str) {
        match err.downcast_ref::<CulpritError>() {
            Some(CulpritError::Storage { details, .. }) => {
                assert!(details.contains(needle), "details: {}", details)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        let repository = JsonSnapshotRepository::new();
        let store = sample_store();

        repository.save(&store, &path).unwrap();
        let loaded = repository.load(&path).unwrap();

        assert_eq!(loaded, store);
        assert_eq!(
            loaded.get(&id("A")).unwrap().imports,
            vec![id("C"), id("B")]
        );
    }

    #[test]
    fn test_save_overwrites_existing_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        let repository = JsonSnapshotRepository::new();

        repository.save(&sample_store(), &path).unwrap();

        let mut smaller = GraphStore::new(id("X"));
        smaller.insert(id("X"), DependencyRecord::leaf());
        repository.save(&smaller, &path).unwrap();

        let loaded = repository.load(&path).unwrap();
        assert_eq!(loaded.root(), &id("X"));
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".dep-culprit").join("graph.json");

        JsonSnapshotRepository::new()
            .save(&sample_store(), &path)
            .unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_snapshot_layout_has_both_maps() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        JsonSnapshotRepository::new()
            .save(&sample_store(), &path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["root"], "A");
        assert_eq!(value["imports"]["A"], serde_json::json!(["C", "B"]));
        assert_eq!(value["deps"]["B"], serde_json::json!(["D", "Target"]));
    }

    #[test]
    fn test_load_missing_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let err = JsonSnapshotRepository::new()
            .load(&temp_dir.path().join("absent.json"))
            .unwrap_err();
        assert_storage_error(&err, "Failed to read metadata");
    }

    #[test]
    fn test_load_corrupt_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonSnapshotRepository::new().load(&path).unwrap_err();
        assert_storage_error(&err, "Corrupt snapshot");
    }

    #[test]
    fn test_load_unsupported_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        fs::write(
            &path,
            r#"{"version": 99, "root": "A", "built_at": "2026-01-01T00:00:00Z",
                "imports": {"A": []}, "deps": {"A": []}}"#,
        )
        .unwrap();

        let err = JsonSnapshotRepository::new().load(&path).unwrap_err();
        assert_storage_error(&err, "Unsupported snapshot version 99");
    }

    #[test]
    fn test_load_mismatched_maps() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        fs::write(
            &path,
            r#"{"version": 1, "root": "A", "built_at": "2026-01-01T00:00:00Z",
                "imports": {"A": ["B"], "B": []}, "deps": {"A": ["B"]}}"#,
        )
        .unwrap();

        let err = JsonSnapshotRepository::new().load(&path).unwrap_err();
        assert_storage_error(&err, "different packages");
    }

    #[test]
    fn test_load_missing_root_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        fs::write(
            &path,
            r#"{"version": 1, "root": "A", "built_at": "2026-01-01T00:00:00Z",
                "imports": {"B": []}, "deps": {"B": []}}"#,
        )
        .unwrap();

        let err = JsonSnapshotRepository::new().load(&path).unwrap_err();
        assert_storage_error(&err, "no record for root package A");
    }

    #[test]
    fn test_load_rejects_oversized_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.json");
        JsonSnapshotRepository::new()
            .save(&sample_store(), &path)
            .unwrap();

        let err = JsonSnapshotRepository::with_max_size(16)
            .load(&path)
            .unwrap_err();
        assert_storage_error(&err, "too large");
    }

    #[test]
    fn test_save_into_unwritable_location_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let err = JsonSnapshotRepository::new()
            .save(&sample_store(), &blocker.join("graph.json"))
            .unwrap_err();
        assert_storage_error(&err, "Failed to create snapshot directory");
    }
}
