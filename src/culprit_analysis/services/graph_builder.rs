use crate::culprit_analysis::domain::{DependencyRecord, GraphStore, PackageId};
use crate::ports::outbound::{GraphProvider, ProgressReporter};
use crate::shared::error::CulpritError;
use crate::shared::Result;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Linear backoff step between provider retries (milliseconds)
const RETRY_BACKOFF_MS: u64 = 100;

/// Tuning knobs for a graph build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Maximum number of provider queries in flight
    pub concurrency: usize,
    /// Deadline for a single provider query
    pub timeout: Duration,
    /// Extra attempts after a failed or timed-out query
    pub max_retries: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }
}

/// GraphBuilder service: populates a `GraphStore` from a `GraphProvider`
///
/// Starting from the root, every package named in a recorded package's
/// imports or transitive dependencies is described exactly once. Queries of
/// one discovery wave run concurrently (bounded by `concurrency`) and land in
/// a shared map where the first result for a package wins.
///
/// Any package that still fails after its retries fails the whole build; a
/// partial graph would break the search's no-dangling-imports assumption.
pub struct GraphBuilder<P: GraphProvider> {
    provider: P,
    options: BuildOptions,
}

impl<P: GraphProvider> GraphBuilder<P> {
    pub fn new(provider: P, options: BuildOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Builds the dependency graph of `root`.
    ///
    /// Progress is emitted as `(processed, discovered so far)` after each
    /// recorded package.
    ///
    /// # Errors
    /// `CulpritError::Provider` naming the first package whose description
    /// could not be obtained.
    pub async fn build<R>(&self, root: &PackageId, progress: &R) -> Result<GraphStore>
    where
        R: ProgressReporter + ?Sized,
    {
        let records: DashMap<PackageId, DependencyRecord> = DashMap::new();
        let mut discovered: HashSet<PackageId> = HashSet::from([root.clone()]);
        let mut pending: Vec<PackageId> = vec![root.clone()];
        let mut processed = 0usize;
        let mut wave = 0usize;

        while !pending.is_empty() {
            wave += 1;
            debug!(wave, packages = pending.len(), "describing discovery wave");

            let batch = std::mem::take(&mut pending);
            let records_ref = &records;
            let mut results = stream::iter(batch)
                .map(|package| async move {
                    let record = self.describe_with_retry(&package).await?;
                    records_ref.entry(package.clone()).or_insert(record);
                    Ok::<PackageId, anyhow::Error>(package)
                })
                .buffer_unordered(self.options.concurrency.max(1));

            while let Some(result) = results.next().await {
                let package = result?;

                if let Some(record) = records.get(&package) {
                    for dep in record.imports.iter().chain(record.transitive_deps.iter()) {
                        if discovered.insert(dep.clone()) {
                            pending.push(dep.clone());
                        }
                    }
                }

                processed += 1;
                progress.report_progress(processed, discovered.len(), Some(package.as_str()));
            }
        }

        let mut store = GraphStore::new(root.clone());
        for (package, record) in records {
            store.insert(package, record);
        }

        debug!(root = %root, packages = store.len(), waves = wave, "graph build complete");
        Ok(store)
    }

    /// Queries the provider with a per-call timeout and bounded retries
    async fn describe_with_retry(&self, package: &PackageId) -> Result<DependencyRecord> {
        let attempts = self.options.max_retries.saturating_add(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match tokio::time::timeout(self.options.timeout, self.provider.describe(package)).await {
                Ok(Ok(record)) => return Ok(record),
                Ok(Err(e)) => last_error = format!("{:#}", e),
                Err(_) => {
                    last_error = format!("timed out after {}s", self.options.timeout.as_secs_f64())
                }
            }

            if attempt < attempts {
                warn!(
                    package = %package,
                    attempt,
                    error = %last_error,
                    "provider query failed, retrying"
                );
                tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64)).await;
            }
        }

        Err(CulpritError::provider(
            package.as_str(),
            format!("{} (after {} attempt(s))", last_error, attempts),
        )
        .into())
    }
}
