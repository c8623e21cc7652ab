pub mod culprit_chain;
pub mod graph_store;
pub mod package_id;
pub mod target_matcher;

pub use culprit_chain::{CulpritChain, CulpritReport};
pub use graph_store::{DependencyRecord, GraphStore};
pub use package_id::PackageId;
pub use target_matcher::{MatchMode, TargetMatcher};
