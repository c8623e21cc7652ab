/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI and the use case, keeping the domain
/// layer free of invocation concerns.
mod culprit_request;
mod culprit_response;
mod output_format;

pub use culprit_request::{CulpritRequest, GraphSource};
pub use culprit_response::{CulpritResponse, GraphOrigin};
pub use output_format::OutputFormat;
