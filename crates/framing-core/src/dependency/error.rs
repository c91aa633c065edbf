//! # Framing Core Dependency Graph Errors
//!
//! Graph construction is all-or-nothing: any [`GraphError`] aborts the build
//! and no partial graph is returned.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A required import names a component that was not discovered.
    #[error("Missing dependency {dependency} for {component}")]
    MissingDependency { component: String, dependency: String },

    /// The components form a dependency cycle; the names list the cycle,
    /// starting and ending with the same component.
    #[error("Cyclic dependency detected: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),
}
