/// Application layer - Use cases and DTOs
///
/// Orchestrates the domain services (graph builder, culprit finder) and
/// coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
