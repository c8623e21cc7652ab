use crate::application::dto::{CulpritRequest, CulpritResponse, GraphOrigin, GraphSource};
use crate::culprit_analysis::domain::GraphStore;
use crate::culprit_analysis::services::{BuildOptions, CulpritFinder, GraphBuilder};
use crate::ports::inbound::CulpritAnalysisPort;
use crate::ports::outbound::{GraphProvider, ProgressReporter, SnapshotRepository};
use crate::shared::error::CulpritError;
use crate::shared::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// FindCulpritsUseCase - Core use case of the tool
///
/// Obtains the dependency graph (snapshot or provider), persists a fresh
/// build, then runs the culprit search on it.
///
/// # Type Parameters
/// * `P` - GraphProvider implementation
/// * `S` - SnapshotRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct FindCulpritsUseCase<P: GraphProvider, S, PR> {
    builder: GraphBuilder<P>,
    snapshot_repository: S,
    progress_reporter: PR,
}

impl<P, S, PR> FindCulpritsUseCase<P, S, PR>
where
    P: GraphProvider,
    S: SnapshotRepository,
    PR: ProgressReporter,
{
    /// Creates a new FindCulpritsUseCase with injected dependencies
    pub fn new(
        provider: P,
        snapshot_repository: S,
        progress_reporter: PR,
        build_options: BuildOptions,
    ) -> Self {
        Self {
            builder: GraphBuilder::new(provider, build_options),
            snapshot_repository,
            progress_reporter,
        }
    }

    /// Executes the culprit analysis
    ///
    /// # Errors
    /// - `CulpritError::Provider` if the graph had to be built and a package
    ///   could not be described
    /// - `CulpritError::Storage` if the snapshot could not be loaded and no
    ///   fallback applies (a failed save only produces a warning)
    /// - `CulpritError::NotFound` if the graph turns out to be incomplete
    pub async fn execute(&self, request: CulpritRequest) -> Result<CulpritResponse> {
        // Step 1: Obtain the graph
        let (store, origin) = self.obtain_graph(&request).await?;

        // Step 2: Persist a fresh build; a failed save does not discard the graph
        let snapshot_saved = origin == GraphOrigin::Provider
            && request.save_snapshot
            && self.save_snapshot(&store, &request)?;

        // Step 3: Search
        self.progress_reporter.report(&format!(
            "🔎 Searching {} package(s) for chains from {} to \"{}\"...",
            store.len(),
            request.root,
            request.target.pattern()
        ));
        let report = CulpritFinder::find(&store, &request.root, &request.target)?;
        info!(chains = report.len(), "culprit search complete");

        self.progress_reporter
            .report_completion(&format!("✅ Found {} chain(s)", report.len()));

        Ok(CulpritResponse::new(report, origin, store.len(), snapshot_saved))
    }

    async fn obtain_graph(&self, request: &CulpritRequest) -> Result<(GraphStore, GraphOrigin)> {
        match request.source {
            GraphSource::Rebuild => Ok((self.build_graph(request).await?, GraphOrigin::Provider)),
            GraphSource::Cached => {
                self.load_or_rebuild(request, request.fallback_to_rebuild)
                    .await
            }
            GraphSource::Auto => {
                if request.snapshot_path.exists() {
                    self.load_or_rebuild(request, true).await
                } else {
                    Ok((self.build_graph(request).await?, GraphOrigin::Provider))
                }
            }
        }
    }

    /// Loads the snapshot; on a storage failure rebuilds if `fallback` is set
    async fn load_or_rebuild(
        &self,
        request: &CulpritRequest,
        fallback: bool,
    ) -> Result<(GraphStore, GraphOrigin)> {
        match self.load_snapshot(request) {
            Ok(store) => Ok((store, GraphOrigin::Snapshot)),
            Err(e) if fallback && Self::is_storage_error(&e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not use snapshot {}: {}",
                    request.snapshot_path.display(),
                    Self::storage_details(&e)
                ));
                Ok((self.build_graph(request).await?, GraphOrigin::Provider))
            }
            Err(e) => Err(e),
        }
    }

    fn load_snapshot(&self, request: &CulpritRequest) -> Result<GraphStore> {
        self.progress_reporter.report(&format!(
            "📖 Loading dependency graph snapshot from: {}",
            request.snapshot_path.display()
        ));

        let store = self.snapshot_repository.load(&request.snapshot_path)?;

        if !store.contains(&request.root) {
            return Err(CulpritError::storage(
                &request.snapshot_path,
                format!(
                    "Snapshot was built for {} and has no record for {}",
                    store.root(),
                    request.root
                ),
            )
            .into());
        }

        self.progress_reporter.report(&format!(
            "✅ Loaded {} package(s) (built {})",
            store.len(),
            store.built_at().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        Ok(store)
    }

    async fn build_graph(&self, request: &CulpritRequest) -> Result<GraphStore> {
        self.progress_reporter.report(&format!(
            "🔨 Building dependency graph for {} (concurrency {})...",
            request.root,
            self.builder.options().concurrency
        ));

        match self.builder.build(&request.root, &self.progress_reporter).await {
            Ok(store) => {
                self.progress_reporter.report_completion(&format!(
                    "✅ Dependency graph built: {} package(s)",
                    store.len()
                ));
                Ok(store)
            }
            Err(e) => {
                self.progress_reporter
                    .report_error("❌ Dependency graph build failed");
                Err(e)
            }
        }
    }

    /// Returns whether the snapshot was written. Storage failures are
    /// reported as a warning; any other error propagates.
    fn save_snapshot(&self, store: &GraphStore, request: &CulpritRequest) -> Result<bool> {
        match self.snapshot_repository.save(store, &request.snapshot_path) {
            Ok(()) => {
                self.progress_reporter.report(&format!(
                    "💾 Snapshot saved to: {}",
                    request.snapshot_path.display()
                ));
                Ok(true)
            }
            Err(e) if Self::is_storage_error(&e) => {
                warn!(path = %request.snapshot_path.display(), error = %e, "snapshot save failed");
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not save snapshot {}: {}",
                    request.snapshot_path.display(),
                    Self::storage_details(&e)
                ));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn is_storage_error(error: &anyhow::Error) -> bool {
        matches!(
            error.downcast_ref::<CulpritError>(),
            Some(CulpritError::Storage { .. })
        )
    }

    fn storage_details(error: &anyhow::Error) -> String {
        match error.downcast_ref::<CulpritError>() {
            Some(CulpritError::Storage { details, .. }) => details.clone(),
            _ => error.to_string(),
        }
    }
}

#[async_trait]
impl<P, S, PR> CulpritAnalysisPort for FindCulpritsUseCase<P, S, PR>
where
    P: GraphProvider,
    S: SnapshotRepository,
    PR: ProgressReporter,
{
    async fn analyze(&self, request: CulpritRequest) -> Result<CulpritResponse> {
        self.execute(request).await
    }
}
