use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// Abstracts where the rendered report goes (stdout, file, ...).
pub trait OutputPresenter {
    /// Presents the rendered report
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
