//! # Framing Core Initialization Path Errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("No node with id {0} in the dependency graph")]
    UnknownNode(usize),

    #[error("Component '{0}' appears more than once in the initialization path")]
    DuplicateEntry(String),

    #[error("Component '{component}' depends on '{dependency}', which does not precede it in the initialization path")]
    UnresolvedDependency { component: String, dependency: String },

    #[error("Unsupported plan format version {found} (expected {expected})")]
    UnsupportedFormatVersion { found: u32, expected: u32 },

    #[error("Plan serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
