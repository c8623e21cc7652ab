use crate::culprit_analysis::domain::{PackageId, TargetMatcher};
use std::path::PathBuf;

/// Where the dependency graph for an analysis comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphSource {
    /// Use the snapshot when it exists, otherwise query the provider
    #[default]
    Auto,
    /// Only use the snapshot
    Cached,
    /// Always query the provider, replacing any snapshot
    Rebuild,
}

/// CulpritRequest - Internal request DTO for the culprit analysis use case
#[derive(Debug, Clone)]
pub struct CulpritRequest {
    /// Package whose dependency closure is analysed
    pub root: PackageId,
    /// Decides which packages count as the target
    pub target: TargetMatcher,
    /// Graph source selection
    pub source: GraphSource,
    /// Snapshot location for loading and saving the graph
    pub snapshot_path: PathBuf,
    /// Whether a freshly built graph is written back to `snapshot_path`
    pub save_snapshot: bool,
    /// Whether a failed snapshot load falls back to rebuilding
    pub fallback_to_rebuild: bool,
}

impl CulpritRequest {
    pub fn new(root: PackageId, target: TargetMatcher, snapshot_path: PathBuf) -> Self {
        Self {
            root,
            target,
            source: GraphSource::default(),
            snapshot_path,
            save_snapshot: true,
            fallback_to_rebuild: false,
        }
    }

    pub fn with_source(mut self, source: GraphSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_save_snapshot(mut self, save_snapshot: bool) -> Self {
        self.save_snapshot = save_snapshot;
        self
    }

    pub fn with_fallback_to_rebuild(mut self, fallback_to_rebuild: bool) -> Self {
        self.fallback_to_rebuild = fallback_to_rebuild;
        self
    }
}
