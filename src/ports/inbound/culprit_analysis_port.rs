use crate::application::dto::{CulpritRequest, CulpritResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// CulpritAnalysisPort - Inbound port for the culprit analysis use case
///
/// The application's public entry point: explain why a target package is
/// part of a root package's dependency closure.
#[async_trait]
pub trait CulpritAnalysisPort: Send + Sync {
    /// Runs one analysis
    ///
    /// # Arguments
    /// * `request` - Root package, target matcher and graph source options
    ///
    /// # Returns
    /// The set of culprit chains plus where the graph came from
    ///
    /// # Errors
    /// Returns an error if:
    /// - The graph provider fails for any package during a build
    /// - The snapshot cannot be loaded or saved
    /// - The graph is missing a record the search needs
    async fn analyze(&self, request: CulpritRequest) -> Result<CulpritResponse>;
}
