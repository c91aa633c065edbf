//! # Framing Core Kernel Errors
//!
//! [`Error`] is the crate-level error returned by the [`Framing`](super::Framing)
//! runner. Each subsystem keeps its own typed error and converts into it with
//! `?`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::component_system::error::ComponentSystemError;
use crate::dependency::error::GraphError;
use crate::execution::error::ExecutionError;
use crate::initialization::error::PathError;
use crate::storage::error::StorageSystemError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Discovery, manifest or loader error
    #[error("Component system error: {0}")]
    ComponentSystem(#[from] ComponentSystemError),

    /// Graph construction error
    #[error("Dependency graph error: {0}")]
    Graph(#[from] GraphError),

    /// Path construction or plan error
    #[error("Initialization path error: {0}")]
    Path(#[from] PathError),

    /// A run failed
    #[error("{0}")]
    Execution(#[from] ExecutionError),

    /// Settings or configuration file error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// The requested entry point is not a root of the graph
    #[error("Entry point '{0}' is not a root component")]
    UnknownEntryPoint(String),

    /// `run` was called on a runner without a component loader
    #[error("No component loader configured")]
    MissingLoader,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
