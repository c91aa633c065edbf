//! # Framing Core Execution
//!
//! The [`ExecutionEngine`] walks an [`InitializationPath`](crate::initialization::InitializationPath)
//! with a cursor. An entry starts as soon as all of its dependencies are
//! initialized; independent entries overlap. Each component is loaded through
//! the injected [`ComponentLoader`](crate::component_system::ComponentLoader),
//! receives its imports (and, when enabled, its configuration) and completes
//! through its [`Completion`](crate::component_system::Completion) handle or a
//! deferred future.
//!
//! Failures never stop independent branches. They are gathered into one
//! [`AggregateInitializationError`] when the run drains; post-initialize hooks
//! run only after a fully successful run.
pub mod engine;
pub mod error;
mod state;

pub use engine::{execute, ExecutionEngine};
pub use error::{AggregateInitializationError, ExecutionError, InitializationFailure, RunReport};
