//! # Framing Core Dependency Graph
//!
//! Turns an ordered list of [`ComponentDescriptor`](crate::component_system::ComponentDescriptor)s
//! into a [`DependencyGraph`]: one node per unique component, a child edge from
//! each node to every component it imports and a parent back-edge the other
//! way. Required imports must resolve ([`GraphError::MissingDependency`]),
//! optional ones are dropped when absent, and cycles are rejected
//! ([`GraphError::CyclicDependency`]).
//!
//! Precedence is first-seen: a descriptor sharing a name or module name with
//! an earlier one is ignored.
pub mod error;
pub mod graph;

pub use error::GraphError;
pub use graph::{build_graph, DependencyGraph, GraphNode, NodeId};

#[cfg(test)]
mod tests;
