use std::collections::HashMap;
use std::path::{Component as PathComponent, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::component_system::error::ComponentSystemError;
use crate::component_system::traits::Component;

/// Turns an entry path into a component's executable unit.
///
/// The execution engine only depends on this capability; how the unit is
/// produced (a static table, a plugin host, a mock) is up to the implementor.
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    async fn load(&self, entry_path: &Path) -> Result<Arc<dyn Component>, ComponentSystemError>;
}

#[async_trait]
impl<F> ComponentLoader for F
where
    F: Fn(&Path) -> Result<Arc<dyn Component>, ComponentSystemError> + Send + Sync,
{
    async fn load(&self, entry_path: &Path) -> Result<Arc<dyn Component>, ComponentSystemError> {
        (self)(entry_path)
    }
}

/// Drops `.` segments so `./components/a/main` and `components/a/main` match.
pub fn normalize_entry_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, PathComponent::CurDir))
        .collect()
}

/// In-memory loader: components registered ahead of time under the entry path
/// their descriptor will resolve to.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<PathBuf, Arc<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under `entry_path`
    pub fn register<C: Component + 'static>(
        &mut self,
        entry_path: impl AsRef<Path>,
        component: C,
    ) -> Result<(), ComponentSystemError> {
        self.register_arc(entry_path, Arc::new(component))
    }

    /// Register an already shared component under `entry_path`
    pub fn register_arc(
        &mut self,
        entry_path: impl AsRef<Path>,
        component: Arc<dyn Component>,
    ) -> Result<(), ComponentSystemError> {
        let key = normalize_entry_path(entry_path.as_ref());
        if self.components.contains_key(&key) {
            return Err(ComponentSystemError::RegistrationError {
                entry_path: key,
                message: "a component is already registered at this path".to_string(),
            });
        }
        log::debug!("Registered component at {}", key.display());
        self.components.insert(key, component);
        Ok(())
    }

    pub fn contains(&self, entry_path: impl AsRef<Path>) -> bool {
        self.components.contains_key(&normalize_entry_path(entry_path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[async_trait]
impl ComponentLoader for ComponentRegistry {
    async fn load(&self, entry_path: &Path) -> Result<Arc<dyn Component>, ComponentSystemError> {
        let key = normalize_entry_path(entry_path);
        self.components
            .get(&key)
            .cloned()
            .ok_or_else(|| ComponentSystemError::LoadingError {
                entry_path: key,
                message: "no component registered at this path".to_string(),
            })
    }
}
