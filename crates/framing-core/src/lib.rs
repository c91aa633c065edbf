pub mod component_system;
pub mod dependency;
pub mod execution;
pub mod initialization;
pub mod kernel;
pub mod storage;

// Re-export key public types for the binary and for host programs
pub use component_system::{
    AsyncComponent, Completion, Component, ComponentDescriptor, ComponentInterface, ComponentLoader,
    ComponentRegistry, ConfigProvider, Deferred, DescriptorBuilder, Imports, Initialization,
};
pub use dependency::{build_graph, DependencyGraph, GraphError};
pub use execution::{execute, AggregateInitializationError, ExecutionEngine, ExecutionError, RunReport};
pub use initialization::{build_initialization_path, union_paths, InitializationPath, PathEntry};
pub use kernel::{Error, Framing, Result};
pub use storage::{ConfigData, FramingSettings};

#[cfg(test)]
mod tests;
