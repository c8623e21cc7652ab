/// Mock implementations for testing
mod mock_graph_provider;
mod mock_progress_reporter;

pub use mock_graph_provider::MockGraphProvider;
pub use mock_progress_reporter::MockProgressReporter;
