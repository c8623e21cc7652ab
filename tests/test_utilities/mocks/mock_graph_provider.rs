use async_trait::async_trait;
use dep_culprit::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock GraphProvider serving records from an in-memory map
#[derive(Default, Clone)]
pub struct MockGraphProvider {
    records: HashMap<String, DependencyRecord>,
    failing: HashSet<String>,
    calls: Arc<AtomicUsize>,
}

impl MockGraphProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: &str, imports: &[&str], deps: &[&str]) -> Self {
        let to_ids = |ids: &[&str]| -> Vec<PackageId> {
            ids.iter().map(|id| PackageId::new(*id).unwrap()).collect()
        };
        self.records.insert(
            package.to_string(),
            DependencyRecord::new(to_ids(imports), to_ids(deps).into_iter().collect()),
        );
        self
    }

    /// Makes every query for `package` fail
    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphProvider for MockGraphProvider {
    async fn describe(&self, package: &PackageId) -> Result<DependencyRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(package.as_str()) {
            anyhow::bail!("simulated provider failure for {}", package);
        }
        self.records
            .get(package.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown package {}", package))
    }
}
