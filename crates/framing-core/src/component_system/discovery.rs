use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

use crate::component_system::descriptor::ComponentDescriptor;
use crate::component_system::error::ComponentSystemError;
use crate::component_system::manifest::parse_manifest;
use crate::kernel::constants::{MANIFEST_FILE_NAME, MODULES_DIR_NAME};

type Result<T> = std::result::Result<T, ComponentSystemError>;

/// Scans component directories for manifests and produces descriptors in
/// precedence order: earlier directories first, entries in file-name order,
/// nested `subDirectories` after everything queued before them.
#[derive(Debug, Clone)]
pub struct ComponentDiscovery {
    base_dir: PathBuf,
    directories: Vec<PathBuf>,
    search_modules_directories: bool,
    config_enabled: bool,
}

impl ComponentDiscovery {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            directories: Vec::new(),
            search_modules_directories: false,
            config_enabled: false,
        }
    }

    /// Add a directory (relative to the base directory) to scan
    pub fn add_directory<P: AsRef<Path>>(&mut self, dir: P) {
        self.directories.push(dir.as_ref().to_path_buf());
    }

    pub fn with_directories<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for dir in dirs {
            self.add_directory(dir);
        }
        self
    }

    /// Also scan `framing_modules` in the base directory and its ancestors.
    pub fn search_modules_directories(mut self, enabled: bool) -> Self {
        self.search_modules_directories = enabled;
        self
    }

    /// Give every discovered component an optional import on `config`.
    pub fn config_enabled(mut self, enabled: bool) -> Self {
        self.config_enabled = enabled;
        self
    }

    /// Discover all components.
    ///
    /// Missing directories contribute nothing. Any other I/O failure, or an
    /// invalid manifest, aborts discovery.
    pub async fn discover(&self) -> Result<Vec<ComponentDescriptor>> {
        let mut directories = self.directories.clone();
        if self.search_modules_directories {
            directories.extend(self.modules_directories().await);
        }
        log::debug!("Scanning component directories: {:?}", directories);

        let mut components = Vec::new();
        let mut i = 0;
        while i < directories.len() {
            let found = self.list_components(&directories[i]).await?;
            for mut descriptor in found {
                if self.config_enabled {
                    descriptor.augment_with_config();
                }
                directories.extend(
                    descriptor
                        .sub_directories
                        .iter()
                        .map(|sub| descriptor.component_path.join(sub)),
                );
                log::debug!(
                    "Discovered component '{}' ({}) at {}",
                    descriptor.name,
                    descriptor.module_name,
                    descriptor.component_path.display()
                );
                components.push(descriptor);
            }
            i += 1;
        }

        log::info!("Discovered {} component(s)", components.len());
        Ok(components)
    }

    /// `framing_modules`, `../framing_modules`, ... for as long as they exist.
    async fn modules_directories(&self) -> Vec<PathBuf> {
        let base = match fs::canonicalize(&self.base_dir).await {
            Ok(base) => base,
            Err(e) => {
                log::debug!("Cannot resolve base directory {}: {}", self.base_dir.display(), e);
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        let mut relative = PathBuf::from(MODULES_DIR_NAME);
        for ancestor in base.ancestors() {
            let is_dir = fs::metadata(ancestor.join(MODULES_DIR_NAME))
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            if !is_dir {
                break;
            }
            found.push(relative.clone());
            relative = Path::new("..").join(relative);
        }
        found
    }

    async fn list_components(&self, directory: &Path) -> Result<Vec<ComponentDescriptor>> {
        let full_path = self.base_dir.join(directory);
        let read_dir = match fs::read_dir(&full_path).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ComponentSystemError::io(e, "read_dir", full_path)),
        };

        let mut names = Vec::new();
        let mut entries = ReadDirStream::new(read_dir);
        while let Some(entry) = entries.next().await {
            let entry = entry.map_err(|e| ComponentSystemError::io(e, "read_dir", full_path.clone()))?;
            names.push(entry.file_name());
        }
        names.sort();

        let mut components = Vec::new();
        for name in names {
            let entry_path = full_path.join(&name);
            let metadata = fs::metadata(&entry_path)
                .await
                .map_err(|e| ComponentSystemError::io(e, "metadata", entry_path.clone()))?;
            if !metadata.is_dir() {
                continue;
            }
            if let Some(descriptor) = self.process_component(&directory.join(&name)).await? {
                components.push(descriptor);
            }
        }
        Ok(components)
    }

    async fn process_component(&self, component_path: &Path) -> Result<Option<ComponentDescriptor>> {
        let manifest_path = self.base_dir.join(component_path).join(MANIFEST_FILE_NAME);
        let content = match fs::read_to_string(&manifest_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ComponentSystemError::io(e, "read_manifest", manifest_path)),
        };
        parse_manifest(&content, &manifest_path, component_path)
    }
}
