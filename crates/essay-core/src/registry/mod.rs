//! The path registry.
//!
//! # Architecture
//!
//! - `key` - names of the entries and what they point at
//! - `paths` - the immutable [`Paths`] value built from a configuration
//! - `global` - the process-wide context holding the installed registry

pub mod global;
pub mod key;
pub mod paths;

pub use key::{PathKey, PathKind, PathTarget};
pub use paths::Paths;
