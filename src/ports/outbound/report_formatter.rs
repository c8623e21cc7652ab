use crate::culprit_analysis::domain::CulpritReport;
use crate::shared::Result;

/// ReportFormatter port for rendering a culprit report
pub trait ReportFormatter {
    /// Renders the report into its textual output form
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &CulpritReport) -> Result<String>;
}
