/// Inbound ports (Driving ports) - Use case interfaces
///
/// The interface external adapters (the CLI) use to drive the application.
pub mod culprit_analysis_port;

pub use culprit_analysis_port::CulpritAnalysisPort;
