use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::component_system::descriptor::ComponentDescriptor;
use crate::component_system::traits::{
    BoxError, Component, ComponentInterface, Imports, PostInitializeHook,
};
use crate::execution::error::InitializationFailure;
use crate::initialization::path::PathEntry;

/// Scratch state of one run, owned by the engine and dropped when it ends.
///
/// Interfaces and loaded units live here rather than on the path entries, so
/// a path can be executed any number of times.
#[derive(Default)]
pub(crate) struct RunState {
    /// Index of the next entry to attempt; everything before it has started
    /// or was skipped
    pub cursor: usize,
    pub in_flight: usize,
    /// Interfaces keyed by component name and module name
    initialized: HashMap<String, ComponentInterface>,
    order: Vec<String>,
    instances: HashMap<String, Arc<dyn Component>>,
    pub errors: Vec<InitializationFailure>,
    /// Names of failed components and of entries skipped because of them
    blocked: HashSet<String>,
    /// Entries skipped because a dependency failed, in path order
    stranded: Vec<String>,
    hooks: Vec<(String, PostInitializeHook)>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_initialize(&self, entry: &PathEntry) -> bool {
        entry
            .dependency_names
            .iter()
            .all(|name| self.initialized.contains_key(name))
    }

    /// True when a dependency of `entry` failed or was itself skipped, so
    /// `entry` can never start.
    pub fn is_blocked(&self, entry: &PathEntry) -> bool {
        entry
            .dependency_names
            .iter()
            .any(|name| self.blocked.contains(name))
    }

    pub fn mark_stranded(&mut self, descriptor: &ComponentDescriptor) {
        self.blocked.insert(descriptor.name.clone());
        self.blocked.insert(descriptor.module_name.clone());
        self.stranded.push(descriptor.name.clone());
    }

    /// Required imports are guaranteed by the gate; optional ones are bound
    /// only when initialized.
    pub fn build_imports(&self, descriptor: &ComponentDescriptor) -> Imports {
        let mut imports = Imports::new();
        for name in descriptor.imports.iter().chain(&descriptor.optional_imports) {
            if let Some(interface) = self.initialized.get(name) {
                imports.insert(name, interface.clone());
            }
        }
        imports
    }

    pub fn instance(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.instances.get(name).cloned()
    }

    /// Keep a freshly loaded unit and queue its post-initialize hook.
    pub fn register_instance(&mut self, name: &str, component: Arc<dyn Component>) {
        if let Some(hook) = component.post_initialize_hook() {
            self.hooks.push((name.to_string(), hook));
        }
        self.instances.insert(name.to_string(), component);
    }

    pub fn mark_initialized(&mut self, descriptor: &ComponentDescriptor, interface: ComponentInterface) {
        self.initialized
            .insert(descriptor.module_name.clone(), interface.clone());
        self.initialized.insert(descriptor.name.clone(), interface);
        self.order.push(descriptor.name.clone());
    }

    pub fn record_failure(&mut self, descriptor: &ComponentDescriptor, source: BoxError) {
        log::error!(
            "Component '{}' ({}) failed to initialize: {}",
            descriptor.name,
            descriptor.module_name,
            source
        );
        self.blocked.insert(descriptor.name.clone());
        self.blocked.insert(descriptor.module_name.clone());
        self.errors.push(InitializationFailure {
            component: descriptor.name.clone(),
            module_name: descriptor.module_name.clone(),
            source,
        });
    }

    /// Hand over everything a finished run reports.
    pub fn into_parts(
        self,
    ) -> (
        Vec<String>,
        HashMap<String, ComponentInterface>,
        Vec<InitializationFailure>,
        Vec<String>,
        Vec<(String, PostInitializeHook)>,
    ) {
        (self.order, self.initialized, self.errors, self.stranded, self.hooks)
    }
}
