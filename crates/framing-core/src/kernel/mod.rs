//! # Framing Core Kernel
//!
//! Ties the subsystems together:
//!
//! - **[`bootstrap`]**: the [`Framing`] runner. It discovers components from
//!   its [`FramingSettings`](crate::storage::FramingSettings), builds the
//!   dependency graph, selects roots, unions their initialization paths and
//!   runs the result through the execution engine (or writes it as a plan).
//! - **[`constants`]**: reserved names, default directories, file names.
//! - **[`error`]**: the crate-level [`Error`] and `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::Framing;
pub use error::{Error, Result};
