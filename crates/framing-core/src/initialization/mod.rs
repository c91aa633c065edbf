//! # Framing Core Initialization Paths
//!
//! An [`InitializationPath`] is the flat order in which a run initializes its
//! components:
//!
//! - **[`path`]**: building a path from one graph root (children first,
//!   sibling branches balanced to the deepest level, sorted by level then
//!   dependency count, deduplicated by name) and the union of paths from
//!   several roots.
//! - **[`plan`]**: JSON plan files, so a computed path can be inspected or
//!   executed later without discovery.
//! - **[`error`]**: [`PathError`].
pub mod error;
pub mod path;
pub mod plan;

pub use error::PathError;
pub use path::{build_initialization_path, union_paths, InitializationPath, PathEntry};
pub use plan::{clean_path, read_plan, write_plan};
