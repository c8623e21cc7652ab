use crate::culprit_analysis::domain::{DependencyRecord, PackageId};
use crate::shared::Result;
use async_trait::async_trait;

/// GraphProvider port for querying the external dependency-graph source
///
/// This port abstracts the tool that knows a package's direct imports and
/// full transitive dependency set (e.g. `go list -json`).
///
/// # Async Support
/// The builder issues several queries concurrently, so implementations must
/// be `Send + Sync`.
#[async_trait]
pub trait GraphProvider: Send + Sync {
    /// Describes a single package
    ///
    /// # Arguments
    /// * `package` - Identifier of the package to describe
    ///
    /// # Returns
    /// The package's direct imports (in source order) and its transitive
    /// dependency set. A package without dependencies yields an empty record.
    ///
    /// # Errors
    /// Returns an error if the package cannot be resolved or the provider's
    /// answer cannot be parsed. Timeouts are applied by the caller.
    async fn describe(&self, package: &PackageId) -> Result<DependencyRecord>;
}
