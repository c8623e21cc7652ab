mod culprit_finder;
mod graph_builder;

pub use culprit_finder::CulpritFinder;
pub use graph_builder::{BuildOptions, GraphBuilder};
