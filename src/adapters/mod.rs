/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the ports: the `go list` provider, the
/// snapshot file, console progress and report output.
pub mod outbound;
