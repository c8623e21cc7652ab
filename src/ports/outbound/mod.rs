/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define what the application core needs from the outside
/// world: the graph provider, snapshot storage, the console and output.
pub mod graph_provider;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod snapshot_repository;

pub use graph_provider::GraphProvider;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use snapshot_repository::SnapshotRepository;
