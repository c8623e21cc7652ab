/// ProgressReporter port for reporting progress during long operations
///
/// The graph builder never prints; it only emits progress through this port
/// so the caller decides how (or whether) to surface it.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Items discovered so far (may grow between calls)
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
