#![cfg(test)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::component_system::descriptor::{ComponentDescriptor, DescriptorBuilder};
use crate::component_system::loader::{ComponentLoader, ComponentRegistry};
use crate::component_system::traits::{
    BoxError, Completion, Component, ComponentInterface, Imports, Initialization,
    InitializationResult, PostInitializeHook,
};
use crate::storage::config::ConfigData;

/// Shared record of what mock components did, in order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

/// How a [`MockComponent`] completes.
#[derive(Clone, Debug)]
pub enum Behavior {
    /// Completes through the handle before returning
    Ready,
    /// Completes through the handle from a spawned task
    ReadyLater,
    /// Fails through the handle
    Fail(String),
    /// Returns `Err` from `initialize`
    Throw(String),
    /// Panics inside `initialize`
    Panic,
    /// Drops the completion handle
    DropHandle,
    /// Returns a deferred future that succeeds after yielding
    Deferred,
    /// Returns a deferred future that fails
    DeferredFail(String),
}

/// Configurable component recording its calls into a [`CallLog`].
///
/// `init:<name>` is logged when `initialize` is called and `hook:<name>` when
/// its post-initialize hook runs.
#[derive(Clone)]
pub struct MockComponent {
    name: String,
    log: CallLog,
    behavior: Behavior,
    accepts_config: bool,
    with_hook: bool,
    interface: Option<ComponentInterface>,
    configs: Arc<Mutex<Vec<Option<ConfigData>>>>,
    imports: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockComponent {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            behavior: Behavior::Ready,
            accepts_config: false,
            with_hook: false,
            interface: None,
            configs: Arc::default(),
            imports: Arc::default(),
        }
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn accepting_config(mut self) -> Self {
        self.accepts_config = true;
        self
    }

    pub fn with_hook(mut self) -> Self {
        self.with_hook = true;
        self
    }

    pub fn exposing(mut self, interface: ComponentInterface) -> Self {
        self.interface = Some(interface);
        self
    }

    /// Configurations received, one per `initialize` call
    pub fn configs(&self) -> Vec<Option<ConfigData>> {
        self.configs.lock().unwrap().clone()
    }

    /// Import names received, one list per `initialize` call
    pub fn imports(&self) -> Vec<Vec<String>> {
        self.imports.lock().unwrap().clone()
    }
}

impl Component for MockComponent {
    fn accepts_config(&self) -> bool {
        self.accepts_config
    }

    fn initialize(
        &self,
        config: Option<ConfigData>,
        imports: Imports,
        done: Completion,
    ) -> Result<Initialization, BoxError> {
        self.log.push(format!("init:{}", self.name));
        self.configs.lock().unwrap().push(config);
        self.imports
            .lock()
            .unwrap()
            .push(imports.names().into_iter().map(str::to_string).collect());

        let interface = self.interface.clone();
        match self.behavior.clone() {
            Behavior::Ready => {
                done.finish(Ok(interface));
                Ok(Initialization::Callback)
            }
            Behavior::ReadyLater => {
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    done.finish(Ok(interface));
                });
                Ok(Initialization::Callback)
            }
            Behavior::Fail(message) => {
                done.fail(message);
                Ok(Initialization::Callback)
            }
            Behavior::Throw(message) => Err(message.into()),
            Behavior::Panic => panic!("{} exploded", self.name),
            Behavior::DropHandle => {
                drop(done);
                Ok(Initialization::Callback)
            }
            Behavior::Deferred => Ok(Initialization::deferred(async move {
                tokio::task::yield_now().await;
                let result: InitializationResult = Ok(interface);
                result
            })),
            Behavior::DeferredFail(message) => Ok(Initialization::deferred(async move {
                let result: InitializationResult = Err(message.into());
                result
            })),
        }
    }

    fn post_initialize_hook(&self) -> Option<PostInitializeHook> {
        if !self.with_hook {
            return None;
        }
        let log = self.log.clone();
        let name = self.name.clone();
        Some(Box::new(move || log.push(format!("hook:{}", name))))
    }
}

/// Descriptor whose entry path is the component name.
pub fn descriptor(name: &str, imports: &[&str]) -> ComponentDescriptor {
    DescriptorBuilder::new(name).imports(imports).build().unwrap()
}

/// Descriptor with optional imports only.
pub fn optional_descriptor(name: &str, optional: &[&str]) -> ComponentDescriptor {
    DescriptorBuilder::new(name)
        .optional_imports(optional)
        .build()
        .unwrap()
}

/// Registry loader serving each component under its descriptor's entry path.
pub fn registry_for(components: &[(&ComponentDescriptor, Arc<dyn Component>)]) -> Arc<dyn ComponentLoader> {
    let mut registry = ComponentRegistry::new();
    for (descriptor, component) in components {
        registry
            .register_arc(&descriptor.entry_path, Arc::clone(component))
            .unwrap();
    }
    Arc::new(registry)
}

/// Write a component directory with a `package.json` manifest.
pub fn write_component(dir: &Path, folder: &str, name: &str, imports: &[&str]) {
    let component_dir = dir.join(folder);
    std::fs::create_dir_all(&component_dir).unwrap();
    let manifest = serde_json::json!({
        "name": name,
        "main": "index.js",
        "framing": { "imports": imports }
    });
    std::fs::write(component_dir.join("package.json"), manifest.to_string()).unwrap();
}
