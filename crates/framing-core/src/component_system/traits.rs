use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::oneshot;

use crate::component_system::descriptor::ComponentDescriptor;
use crate::kernel::constants::CONFIG_COMPONENT_NAME;
use crate::storage::config::ConfigData;

/// Error type returned by component code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome reported by an initializer: the interface it exposes (if any) or
/// the error it failed with.
pub type InitializationResult = Result<Option<ComponentInterface>, BoxError>;

/// Hook run once, after every component in a run initialized successfully.
pub type PostInitializeHook = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Copy, Default)]
struct EmptyInterface;

/// The value a component exposes to its dependents once initialized.
///
/// Cloning is cheap: every dependent shares the same underlying value.
#[derive(Clone)]
pub struct ComponentInterface(Arc<dyn Any + Send + Sync>);

impl ComponentInterface {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// The interface recorded for components that expose nothing.
    pub fn empty() -> Self {
        Self(Arc::new(EmptyInterface))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is::<EmptyInterface>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Wrap a [`ConfigProvider`], the interface of the reserved `config` component.
    pub fn from_config_provider<P: ConfigProvider + 'static>(provider: P) -> Self {
        Self::from_shared_config_provider(Arc::new(provider))
    }

    pub fn from_shared_config_provider(provider: Arc<dyn ConfigProvider>) -> Self {
        Self::new(provider)
    }

    /// View this interface as a [`ConfigProvider`], if it is one.
    pub fn config_provider(&self) -> Option<Arc<dyn ConfigProvider>> {
        self.downcast_ref::<Arc<dyn ConfigProvider>>().cloned()
    }
}

impl fmt::Debug for ComponentInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ComponentInterface(<empty>)")
        } else {
            f.write_str("ComponentInterface(..)")
        }
    }
}

/// Interface the `config` component must expose.
pub trait ConfigProvider: Send + Sync {
    /// Configuration for the component described by `descriptor`, if any.
    fn load(&self, descriptor: &ComponentDescriptor) -> Option<ConfigData>;
}

/// Interfaces of already-initialized dependencies, keyed by import name.
#[derive(Clone, Debug, Default)]
pub struct Imports {
    bindings: HashMap<String, ComponentInterface>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, interface: ComponentInterface) {
        self.bindings.insert(name.to_string(), interface);
    }

    pub fn get(&self, name: &str) -> Option<&ComponentInterface> {
        self.bindings.get(name)
    }

    /// Typed access to an imported interface.
    pub fn get_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(|interface| interface.downcast_ref::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The `config` component's provider, when it was imported.
    pub fn config(&self) -> Option<Arc<dyn ConfigProvider>> {
        self.get(CONFIG_COMPONENT_NAME)
            .and_then(ComponentInterface::config_provider)
    }
}

/// One-shot completion handle passed to every initializer.
///
/// A callback-style initializer finishes by calling exactly one of the
/// consuming methods, immediately or from a task it spawned. Dropping the
/// handle without calling any of them fails the component.
#[derive(Debug)]
pub struct Completion {
    sender: oneshot::Sender<InitializationResult>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<InitializationResult>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Finish successfully without exposing an interface.
    pub fn ready(self) {
        self.finish(Ok(None));
    }

    /// Finish successfully, exposing `interface` to dependents.
    pub fn ready_with(self, interface: ComponentInterface) {
        self.finish(Ok(Some(interface)));
    }

    /// Fail the component.
    pub fn fail(self, error: impl Into<BoxError>) {
        self.finish(Err(error.into()));
    }

    pub fn finish(self, result: InitializationResult) {
        // The run may already be gone; nothing is waiting in that case.
        let _ = self.sender.send(result);
    }
}

/// How an initializer will report completion.
pub enum Initialization {
    /// Completion arrives through the [`Completion`] handle.
    Callback,
    /// Completion is the outcome of this future; the handle is ignored.
    Deferred(BoxFuture<'static, InitializationResult>),
}

impl Initialization {
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = InitializationResult> + Send + 'static,
    {
        Initialization::Deferred(future.boxed())
    }
}

impl fmt::Debug for Initialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initialization::Callback => f.write_str("Callback"),
            Initialization::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// The executable unit of a component, as returned by a
/// [`ComponentLoader`](crate::component_system::loader::ComponentLoader).
pub trait Component: Send + Sync {
    /// Whether the initializer takes a configuration argument.
    ///
    /// Only honoured when configuration injection is enabled for the run;
    /// otherwise `config` is always `None`.
    fn accepts_config(&self) -> bool {
        false
    }

    /// Start initializing.
    ///
    /// Returning `Err` fails the component immediately. Otherwise the result
    /// says whether completion comes through `done` or a deferred future.
    fn initialize(
        &self,
        config: Option<ConfigData>,
        imports: Imports,
        done: Completion,
    ) -> Result<Initialization, BoxError>;

    /// Hook to run once the whole run has succeeded. Queried when the
    /// component is loaded.
    fn post_initialize_hook(&self) -> Option<PostInitializeHook> {
        None
    }
}
