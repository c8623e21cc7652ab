/// Graph provider adapters (external dependency-graph sources)
mod go_list_provider;

pub use go_list_provider::GoListProvider;
