use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::storage::error::StorageSystemError;

type Result<T> = std::result::Result<T, StorageSystemError>;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Parse `data` in this format into any deserializable value.
    pub fn parse<T: for<'de> Deserialize<'de>>(&self, data: &str) -> Result<T> {
        let deserialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            StorageSystemError::DeserializationError {
                format: self.extension().to_string(),
                source,
            }
        };
        match self {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| deserialization_error(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| deserialization_error(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| deserialization_error(Box::new(e))),
        }
    }
}

/// Read a configuration file, choosing the format from its extension.
pub async fn read_config_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.display().to_string()))?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StorageSystemError::io(e, "read_config", path.to_path_buf()))?;
    format.parse(&content)
}

/// Configuration handed to a component that accepts one.
///
/// An empty `ConfigData` is what a component receives when configuration
/// injection is on but nothing was loaded for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Raw configuration values
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get a configuration value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.values.get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| StorageSystemError::SerializationError {
            format: ConfigFormat::Json.extension().to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Builder-style variant of [`ConfigData::set`] for plain JSON values.
    pub fn with(mut self, key: &str, value: serde_json::Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Check if key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get all keys
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
