use std::sync::Arc;

use async_trait::async_trait;

use crate::component_system::traits::{
    BoxError, Completion, Component, ComponentInterface, Imports, Initialization, PostInitializeHook,
};
use crate::storage::config::ConfigData;

/// A component whose initializer is a plain `async fn`.
///
/// Wrap it in [`Deferred`] to get a [`Component`]: the returned future becomes
/// the deferred completion of the run.
#[async_trait]
pub trait AsyncComponent: Send + Sync + 'static {
    /// See [`Component::accepts_config`].
    fn accepts_config(&self) -> bool {
        false
    }

    async fn initialize(
        &self,
        config: Option<ConfigData>,
        imports: Imports,
    ) -> Result<Option<ComponentInterface>, BoxError>;

    /// See [`Component::post_initialize_hook`].
    fn post_initialize_hook(&self) -> Option<PostInitializeHook> {
        None
    }
}

/// Adapts an [`AsyncComponent`] to the [`Component`] call shape.
pub struct Deferred<C> {
    inner: Arc<C>,
}

impl<C: AsyncComponent> Deferred<C> {
    pub fn new(component: C) -> Self {
        Self { inner: Arc::new(component) }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: AsyncComponent> Component for Deferred<C> {
    fn accepts_config(&self) -> bool {
        self.inner.accepts_config()
    }

    fn initialize(
        &self,
        config: Option<ConfigData>,
        imports: Imports,
        _done: Completion,
    ) -> Result<Initialization, BoxError> {
        let inner = Arc::clone(&self.inner);
        Ok(Initialization::deferred(async move {
            inner.initialize(config, imports).await
        }))
    }

    fn post_initialize_hook(&self) -> Option<PostInitializeHook> {
        self.inner.post_initialize_hook()
    }
}
