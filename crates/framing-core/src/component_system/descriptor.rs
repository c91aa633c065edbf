use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::component_system::error::ComponentSystemError;
use crate::kernel::constants::CONFIG_COMPONENT_NAME;

/// Immutable metadata describing one component.
///
/// Produced by discovery (or built by hand with [`DescriptorBuilder`]) and
/// never mutated by the graph, path or execution stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Unique key of the component within a run
    pub name: String,

    /// Secondary key, the name of the module that ships the component
    pub module_name: String,

    /// Directory holding the component, relative to the base directory
    pub component_path: PathBuf,

    /// Location of the component's executable unit
    pub entry_path: PathBuf,

    /// Names of components that must be initialized first
    #[serde(default)]
    pub imports: Vec<String>,

    /// Names of components bound when present, skipped otherwise
    #[serde(default)]
    pub optional_imports: Vec<String>,

    /// Directories below `component_path` scanned for nested components
    #[serde(default)]
    pub sub_directories: Vec<PathBuf>,
}

impl ComponentDescriptor {
    /// Create a descriptor with no imports. The module name defaults to `name`.
    pub fn new(name: &str, entry_path: impl Into<PathBuf>) -> Self {
        let entry_path = entry_path.into();
        let component_path = entry_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            name: name.to_string(),
            module_name: name.to_string(),
            component_path,
            entry_path,
            imports: Vec::new(),
            optional_imports: Vec::new(),
            sub_directories: Vec::new(),
        }
    }

    /// Number of declared import names, required and optional.
    pub fn dependency_count(&self) -> usize {
        self.imports.len() + self.optional_imports.len()
    }

    /// Whether `name` is declared as a required or optional import.
    pub fn imports_name(&self, name: &str) -> bool {
        self.imports.iter().any(|i| i == name) || self.optional_imports.iter().any(|i| i == name)
    }

    /// Checks the invariants every descriptor must hold: a non-empty name and
    /// a non-empty entry path.
    pub fn validate(&self) -> Result<(), ComponentSystemError> {
        if self.name.trim().is_empty() {
            return Err(ComponentSystemError::InvalidDescriptor {
                path: self.component_path.clone(),
                message: "name parameter is missing".to_string(),
            });
        }
        if self.entry_path.as_os_str().is_empty() {
            return Err(ComponentSystemError::InvalidDescriptor {
                path: self.component_path.clone(),
                message: format!("component '{}' has no entry path", self.name),
            });
        }
        Ok(())
    }

    /// Adds an implicit optional import on the `config` component.
    ///
    /// Skipped for the `config` component itself and for components that
    /// already import it. Returns whether the import was added.
    pub fn augment_with_config(&mut self) -> bool {
        if self.name == CONFIG_COMPONENT_NAME || self.imports_name(CONFIG_COMPONENT_NAME) {
            return false;
        }
        self.optional_imports.push(CONFIG_COMPONENT_NAME.to_string());
        true
    }
}

/// Builder for creating a component descriptor
pub struct DescriptorBuilder {
    descriptor: ComponentDescriptor,
}

impl DescriptorBuilder {
    /// Create a new builder; the entry path defaults to the component name.
    pub fn new(name: &str) -> Self {
        Self {
            descriptor: ComponentDescriptor::new(name, name),
        }
    }

    /// Set the module name
    pub fn module_name(mut self, module_name: &str) -> Self {
        self.descriptor.module_name = module_name.to_string();
        self
    }

    /// Set the component directory
    pub fn component_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor.component_path = path.into();
        self
    }

    /// Set the entry path
    pub fn entry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor.entry_path = path.into();
        self
    }

    /// Add a required import
    pub fn import(mut self, name: &str) -> Self {
        self.descriptor.imports.push(name.to_string());
        self
    }

    /// Add multiple required imports
    pub fn imports(mut self, names: &[&str]) -> Self {
        for name in names {
            self.descriptor.imports.push(name.to_string());
        }
        self
    }

    /// Add an optional import
    pub fn optional_import(mut self, name: &str) -> Self {
        self.descriptor.optional_imports.push(name.to_string());
        self
    }

    /// Add multiple optional imports
    pub fn optional_imports(mut self, names: &[&str]) -> Self {
        for name in names {
            self.descriptor.optional_imports.push(name.to_string());
        }
        self
    }

    /// Add a nested component directory
    pub fn sub_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor.sub_directories.push(path.into());
        self
    }

    /// Validate and build the descriptor
    pub fn build(self) -> Result<ComponentDescriptor, ComponentSystemError> {
        self.descriptor.validate()?;
        Ok(self.descriptor)
    }
}
