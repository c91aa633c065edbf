use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::component_system::descriptor::ComponentDescriptor;
use crate::component_system::discovery::ComponentDiscovery;
use crate::component_system::loader::ComponentLoader;
use crate::dependency::graph::{DependencyGraph, NodeId};
use crate::execution::engine::ExecutionEngine;
use crate::execution::error::RunReport;
use crate::initialization::path::InitializationPath;
use crate::initialization::plan;
use crate::kernel::error::{Error, Result};
use crate::storage::settings::FramingSettings;

/// Discovers components, orders them and runs them.
///
/// Discovery, graph and path building need nothing but the settings; running
/// also needs a [`ComponentLoader`].
#[derive(Clone, Default)]
pub struct Framing {
    settings: FramingSettings,
    loader: Option<Arc<dyn ComponentLoader>>,
}

impl Framing {
    /// A runner with default settings: base dir `.`, `./components`, module
    /// directory search on, configuration injection off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: FramingSettings) -> Self {
        Self {
            settings,
            loader: None,
        }
    }

    pub fn settings(&self) -> &FramingSettings {
        &self.settings
    }

    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) -> &mut Self {
        self.settings.base_dir = base_dir.into();
        self
    }

    /// Replace the component directories.
    pub fn set_component_directories<I, P>(&mut self, dirs: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.settings.component_directories.clear();
        self.add_component_directories(dirs)
    }

    /// Append component directories after the existing ones.
    pub fn add_component_directories<I, P>(&mut self, dirs: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.settings
            .component_directories
            .extend(dirs.into_iter().map(|d| d.as_ref().to_path_buf()));
        self
    }

    pub fn search_modules_directories(&mut self, enabled: bool) -> &mut Self {
        self.settings.search_modules_directories = enabled;
        self
    }

    pub fn use_config(&mut self, enabled: bool) -> &mut Self {
        self.settings.use_config = enabled;
        self
    }

    pub fn set_entry_point(&mut self, entry_point: Option<String>) -> &mut Self {
        self.settings.entry_point = entry_point;
        self
    }

    pub fn set_loader(&mut self, loader: Arc<dyn ComponentLoader>) -> &mut Self {
        self.loader = Some(loader);
        self
    }

    pub fn discovery(&self) -> ComponentDiscovery {
        ComponentDiscovery::new(&self.settings.base_dir)
            .with_directories(&self.settings.component_directories)
            .search_modules_directories(self.settings.search_modules_directories)
            .config_enabled(self.settings.use_config)
    }

    pub async fn discover(&self) -> Result<Vec<ComponentDescriptor>> {
        Ok(self.discovery().discover().await?)
    }

    /// Discover components and build their dependency graph.
    pub async fn load_graph(&self) -> Result<DependencyGraph> {
        let descriptors = self.discover().await?;
        Ok(DependencyGraph::build(&descriptors)?)
    }

    /// Roots to initialize: the named entry point, or every root.
    pub fn select_roots(&self, graph: &DependencyGraph, entry_point: Option<&str>) -> Result<Vec<NodeId>> {
        match entry_point.or(self.settings.entry_point.as_deref()) {
            Some(name) => graph
                .root(name)
                .map(|id| vec![id])
                .ok_or_else(|| Error::UnknownEntryPoint(name.to_string())),
            None => Ok(graph.roots().to_vec()),
        }
    }

    /// Discover, build the graph and union the paths of the selected roots.
    pub async fn initialization_path(&self, entry_point: Option<&str>) -> Result<InitializationPath> {
        let graph = self.load_graph().await?;
        let roots = self.select_roots(&graph, entry_point)?;
        Ok(InitializationPath::from_roots(&graph, &roots)?)
    }

    /// Initialize every component reachable from the selected roots.
    pub async fn run(&self, entry_point: Option<&str>) -> Result<RunReport> {
        let path = self.initialization_path(entry_point).await?;
        self.run_path(&path).await
    }

    /// Execute an already computed path, such as one read from a plan file.
    pub async fn run_path(&self, path: &InitializationPath) -> Result<RunReport> {
        let loader = self.loader.clone().ok_or(Error::MissingLoader)?;
        let report = ExecutionEngine::new(loader)
            .with_base_path(&self.settings.base_dir)
            .with_config(self.settings.use_config)
            .execute(path)
            .await?;
        Ok(report)
    }

    /// Write the plan of the selected roots instead of running it.
    pub async fn write_plan<W: Write>(&self, entry_point: Option<&str>, writer: W) -> Result<()> {
        let path = self.initialization_path(entry_point).await?;
        plan::write_plan(writer, &path)?;
        Ok(())
    }
}
