/// Domain layer: the dependency graph model and the pure services that
/// build and search it
pub mod domain;
pub mod services;
