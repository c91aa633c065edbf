use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::kernel::constants;
use crate::storage::config::read_config_file;
use crate::storage::error::StorageSystemError;

/// Runner settings, loadable from a JSON, YAML or TOML file.
///
/// Every field has a default so a settings file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FramingSettings {
    /// Directory every component path is resolved against
    pub base_dir: PathBuf,
    /// Directories scanned for components, in precedence order
    pub component_directories: Vec<PathBuf>,
    /// Also scan `framing_modules` directories in the base dir and its ancestors
    pub search_modules_directories: bool,
    /// Enable configuration injection through the `config` component
    pub use_config: bool,
    /// Only initialize the graph rooted at this component
    pub entry_point: Option<String>,
}

impl Default for FramingSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            component_directories: constants::DEFAULT_COMPONENT_DIRS
                .iter()
                .map(PathBuf::from)
                .collect(),
            search_modules_directories: true,
            use_config: false,
            entry_point: None,
        }
    }
}

impl FramingSettings {
    /// Load settings from `path`; the format follows the file extension.
    pub async fn from_file(path: &Path) -> Result<Self, StorageSystemError> {
        let settings: Self = read_config_file(path).await?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}
