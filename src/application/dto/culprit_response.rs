use crate::culprit_analysis::domain::CulpritReport;

/// Which path produced the graph that was searched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOrigin {
    /// Loaded from the snapshot
    Snapshot,
    /// Built by querying the provider
    Provider,
}

/// CulpritResponse - Internal response DTO from the culprit analysis use case
#[derive(Debug, Clone)]
pub struct CulpritResponse {
    /// The set of culprit chains
    pub report: CulpritReport,
    /// Where the searched graph came from
    pub origin: GraphOrigin,
    /// Number of packages in the searched graph
    pub package_count: usize,
    /// Whether the graph was written to the snapshot during this run
    pub snapshot_saved: bool,
}

impl CulpritResponse {
    pub fn new(
        report: CulpritReport,
        origin: GraphOrigin,
        package_count: usize,
        snapshot_saved: bool,
    ) -> Self {
        Self {
            report,
            origin,
            package_count,
            snapshot_saved,
        }
    }
}
