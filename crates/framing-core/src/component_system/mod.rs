//! # Framing Core Component System
//!
//! Everything about a single component, before it takes part in a graph:
//!
//! - **[`descriptor`]**: [`ComponentDescriptor`], the immutable metadata of a
//!   component, and [`DescriptorBuilder`].
//! - **[`manifest`]**: parsing of the `package.json` manifest into a descriptor.
//! - **[`discovery`]**: [`ComponentDiscovery`], the directory scanner producing
//!   descriptors in precedence order.
//! - **[`traits`]**: the [`Component`] call shape, [`Completion`] handles,
//!   [`Imports`] and [`ComponentInterface`] values, and the [`ConfigProvider`]
//!   contract of the reserved `config` component.
//! - **[`adapter`]**: [`AsyncComponent`] and the [`Deferred`] adapter for
//!   components written as an `async fn`.
//! - **[`loader`]**: the [`ComponentLoader`] boundary and the in-memory
//!   [`ComponentRegistry`].
//! - **[`error`]**: [`ComponentSystemError`](error::ComponentSystemError).
pub mod adapter;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod traits;

pub use adapter::{AsyncComponent, Deferred};
pub use descriptor::{ComponentDescriptor, DescriptorBuilder};
pub use discovery::ComponentDiscovery;
pub use error::ComponentSystemError;
pub use loader::{ComponentLoader, ComponentRegistry};
pub use traits::{
    BoxError, Completion, Component, ComponentInterface, ConfigProvider, Imports, Initialization,
    InitializationResult, PostInitializeHook,
};

// Test module declaration
#[cfg(test)]
mod tests;
