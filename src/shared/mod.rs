/// Shared kernel: error taxonomy, result alias and filesystem guards
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
