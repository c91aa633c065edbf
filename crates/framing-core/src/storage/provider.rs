use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::component_system::descriptor::ComponentDescriptor;
use crate::component_system::traits::{
    BoxError, Completion, Component, ComponentInterface, ConfigProvider, Imports, Initialization,
};
use crate::storage::config::{read_config_file, ConfigData};
use crate::storage::error::StorageSystemError;

/// A [`ConfigProvider`] holding one configuration section per component name.
///
/// The backing file maps component names to that component's configuration:
///
/// ```json
/// { "server": { "port": 8080 }, "session-store": { "ttl": 60 } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileConfigProvider {
    sections: HashMap<String, ConfigData>,
}

impl FileConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the section served to the component called `name`.
    pub fn with_section(mut self, name: &str, data: ConfigData) -> Self {
        self.sections.insert(name.to_string(), data);
        self
    }

    /// Read sections from a JSON, YAML or TOML file.
    pub async fn from_file(path: &Path) -> Result<Self, StorageSystemError> {
        let sections: HashMap<String, ConfigData> = read_config_file(path).await?;
        log::debug!("Loaded {} config section(s) from {}", sections.len(), path.display());
        Ok(Self { sections })
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self, descriptor: &ComponentDescriptor) -> Option<ConfigData> {
        self.sections.get(&descriptor.name).cloned()
    }
}

/// Exposes a [`ConfigProvider`] as a component, so it can be registered under
/// the reserved `config` name and imported by the components it configures.
#[derive(Clone)]
pub struct ConfigComponent {
    provider: Arc<dyn ConfigProvider>,
}

impl ConfigComponent {
    pub fn new<P: ConfigProvider + 'static>(provider: P) -> Self {
        Self { provider: Arc::new(provider) }
    }
}

impl Component for ConfigComponent {
    fn initialize(
        &self,
        _config: Option<ConfigData>,
        _imports: Imports,
        done: Completion,
    ) -> Result<Initialization, BoxError> {
        done.ready_with(ComponentInterface::from_shared_config_provider(self.provider.clone()));
        Ok(Initialization::Callback)
    }
}
