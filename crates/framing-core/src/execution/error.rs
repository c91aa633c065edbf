//! # Framing Core Execution Errors
//!
//! Initialization failures are collected for the whole run and reported once,
//! as an [`AggregateInitializationError`], when nothing is left in flight.
use std::collections::HashMap;
use std::fmt::Write as _;

use thiserror::Error;

use crate::component_system::traits::{BoxError, ComponentInterface};
use crate::initialization::error::PathError;

/// One component's failure: an error it reported, returned, or panicked with,
/// or the failure to load it.
#[derive(Debug, Error)]
#[error("{component}::{module_name}: {source}")]
pub struct InitializationFailure {
    pub component: String,
    pub module_name: String,
    #[source]
    pub source: BoxError,
}

/// Every failure of a run, in the order they happened.
#[derive(Debug, Error)]
#[error("Errors occurred during initialization.")]
pub struct AggregateInitializationError {
    pub failures: Vec<InitializationFailure>,
    /// Components that did initialize, in completion order
    pub initialized: Vec<String>,
    /// Components never started because a dependency failed
    pub stranded: Vec<String>,
}

impl AggregateInitializationError {
    /// Human-readable diagnostics: one `name::module` line per failure
    /// followed by the indented error message.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for failure in &self.failures {
            let _ = writeln!(out, "{}::{}", failure.component, failure.module_name);
            for line in failure.source.to_string().lines() {
                let _ = writeln!(out, "  {}", line);
            }
        }
        out
    }

    /// The failure reported for `component`, if any.
    pub fn failure(&self, component: &str) -> Option<&InitializationFailure> {
        self.failures.iter().find(|f| f.component == component)
    }
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Initialization(#[from] AggregateInitializationError),

    /// The walk stopped without any failure; only possible with a path whose
    /// dependencies are out of order.
    #[error("Initialization stalled; components never started: {}", pending.join(", "))]
    Stalled { pending: Vec<String> },

    #[error("Initialization path error: {0}")]
    Path(#[from] PathError),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Component names in completion order
    pub initialized: Vec<String>,
    interfaces: HashMap<String, ComponentInterface>,
}

impl RunReport {
    pub(crate) fn new(initialized: Vec<String>, interfaces: HashMap<String, ComponentInterface>) -> Self {
        Self { initialized, interfaces }
    }

    /// The interface `name` exposed once initialized.
    pub fn interface(&self, name: &str) -> Option<&ComponentInterface> {
        self.interfaces.get(name)
    }

    pub fn len(&self) -> usize {
        self.initialized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initialized.is_empty()
    }
}
