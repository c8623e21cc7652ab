use super::PackageId;
use std::collections::HashSet;

/// One explanation of how the target entered the root's dependency closure.
///
/// Runs root -> intermediate packages -> the package that directly imports
/// the target, and ends with the matched target identifier itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CulpritChain(Vec<PackageId>);

impl CulpritChain {
    /// Builds a chain from a search path plus the matched target.
    pub fn new(path: &[PackageId], target: &PackageId) -> Self {
        let mut packages = Vec::with_capacity(path.len() + 1);
        packages.extend_from_slice(path);
        packages.push(target.clone());
        Self(packages)
    }

    pub fn packages(&self) -> &[PackageId] {
        &self.0
    }

    pub fn root(&self) -> &PackageId {
        &self.0[0]
    }

    /// The package whose direct imports contain the target
    pub fn importer(&self) -> &PackageId {
        &self.0[self.0.len() - 2]
    }

    /// The matched target identifier
    pub fn target(&self) -> &PackageId {
        &self.0[self.0.len() - 1]
    }

    /// Number of import hops from the root to the target
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    pub fn render(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(PackageId::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl std::fmt::Display for CulpritChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(" -> "))
    }
}

/// Result set of a culprit search: every distinct chain found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CulpritReport {
    root: PackageId,
    target_pattern: String,
    chains: HashSet<CulpritChain>,
}

impl CulpritReport {
    pub fn new(root: PackageId, target_pattern: impl Into<String>) -> Self {
        Self {
            root,
            target_pattern: target_pattern.into(),
            chains: HashSet::new(),
        }
    }

    /// Adds a chain; identical chains collapse into one entry
    pub fn record(&mut self, chain: CulpritChain) -> bool {
        self.chains.insert(chain)
    }

    pub fn root(&self) -> &PackageId {
        &self.root
    }

    pub fn target_pattern(&self) -> &str {
        &self.target_pattern
    }

    pub fn chains(&self) -> &HashSet<CulpritChain> {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Chains ordered for display: shortest first, then lexicographically
    pub fn sorted_chains(&self) -> Vec<&CulpritChain> {
        let mut chains: Vec<&CulpritChain> = self.chains.iter().collect();
        chains.sort_by(|a, b| a.hops().cmp(&b.hops()).then_with(|| a.cmp(b)));
        chains
    }

    /// Distinct target identifiers that were matched
    pub fn matched_targets(&self) -> Vec<&PackageId> {
        let mut targets: Vec<&PackageId> = self.chains.iter().map(CulpritChain::target).collect();
        targets.sort();
        targets.dedup();
        targets
    }
}
