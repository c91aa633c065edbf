use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};

use crate::component_system::loader::ComponentLoader;
use crate::component_system::traits::{
    BoxError, Completion, ComponentInterface, Imports, Initialization, InitializationResult,
};
use crate::dependency::graph::{DependencyGraph, NodeId};
use crate::execution::error::{AggregateInitializationError, ExecutionError, RunReport};
use crate::execution::state::RunState;
use crate::initialization::path::{InitializationPath, PathEntry};

type InFlight = FuturesUnordered<BoxFuture<'static, (usize, InitializationResult)>>;

/// Drives one [`InitializationPath`] to completion.
///
/// All in-flight initializations are polled on the calling task; nothing is
/// spawned, so a component's code never runs concurrently with itself and the
/// run state needs no locking.
pub struct ExecutionEngine {
    loader: Arc<dyn ComponentLoader>,
    base_path: PathBuf,
    config_enabled: bool,
}

impl ExecutionEngine {
    pub fn new(loader: Arc<dyn ComponentLoader>) -> Self {
        Self {
            loader,
            base_path: PathBuf::new(),
            config_enabled: false,
        }
    }

    /// Directory every entry path is joined to before loading.
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Enable configuration injection for components that accept it.
    pub fn with_config(mut self, enabled: bool) -> Self {
        self.config_enabled = enabled;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize every component of `path`.
    ///
    /// Succeeds once every entry initialized and the post-initialize hooks
    /// ran. Otherwise all failures are returned together once nothing is
    /// left in flight; entries gated on a failed component are never started,
    /// while independent entries after them still run.
    pub async fn execute(&self, path: &InitializationPath) -> Result<RunReport, ExecutionError> {
        let entries = path.entries();
        let mut state = RunState::new();
        let mut in_flight = InFlight::new();

        log::info!("Initializing {} component(s)", entries.len());
        self.advance(entries, &mut state, &mut in_flight).await;

        while let Some((index, result)) = in_flight.next().await {
            state.in_flight -= 1;
            let descriptor = &entries[index].descriptor;
            match result {
                Ok(interface) => {
                    log::debug!("Component '{}' initialized", descriptor.name);
                    state.mark_initialized(descriptor, interface.unwrap_or_else(ComponentInterface::empty));
                    self.advance(entries, &mut state, &mut in_flight).await;
                }
                Err(source) => {
                    state.record_failure(descriptor, source);
                    self.advance(entries, &mut state, &mut in_flight).await;
                }
            }
        }

        finish(entries, state)
    }

    /// Start every entry from the cursor on whose dependencies are all
    /// initialized, stopping at the first one still waiting. Entries behind a
    /// failed dependency are skipped.
    async fn advance(&self, entries: &[PathEntry], state: &mut RunState, in_flight: &mut InFlight) {
        while let Some(entry) = entries.get(state.cursor) {
            if state.is_blocked(entry) {
                log::debug!("Component '{}' skipped, a dependency failed", entry.name());
                state.mark_stranded(&entry.descriptor);
                state.cursor += 1;
                continue;
            }
            if !state.can_initialize(entry) {
                log::debug!("Component '{}' waits for its dependencies", entry.name());
                break;
            }
            let index = state.cursor;
            state.cursor += 1;

            let imports = state.build_imports(&entry.descriptor);
            state.in_flight += 1;
            match self.start(entry, imports, state).await {
                Ok(completion) => in_flight.push(completion.map(move |result| (index, result)).boxed()),
                Err(source) => {
                    state.in_flight -= 1;
                    state.record_failure(&entry.descriptor, source);
                }
            }
        }
    }

    async fn start(
        &self,
        entry: &PathEntry,
        imports: Imports,
        state: &mut RunState,
    ) -> Result<BoxFuture<'static, InitializationResult>, BoxError> {
        let component = match state.instance(entry.name()) {
            Some(component) => component,
            None => {
                let entry_path = self.base_path.join(&entry.descriptor.entry_path);
                let component = self.loader.load(&entry_path).await?;
                state.register_instance(entry.name(), Arc::clone(&component));
                component
            }
        };

        let config = if self.config_enabled && component.accepts_config() {
            Some(
                imports
                    .config()
                    .and_then(|provider| provider.load(&entry.descriptor))
                    .unwrap_or_default(),
            )
        } else {
            None
        };

        log::debug!("Starting component '{}'", entry.name());
        let (done, receiver) = Completion::channel();
        let started = panic::catch_unwind(AssertUnwindSafe(|| {
            component.initialize(config, imports, done)
        }))
        .map_err(panic_error)??;

        Ok(match started {
            Initialization::Callback => async move {
                receiver
                    .await
                    .unwrap_or_else(|_| Err("completion handle dropped".into()))
            }
            .boxed(),
            Initialization::Deferred(future) => async move {
                AssertUnwindSafe(future)
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|payload| Err(panic_error(payload)))
            }
            .boxed(),
        })
    }
}

fn finish(entries: &[PathEntry], state: RunState) -> Result<RunReport, ExecutionError> {
    debug_assert_eq!(state.in_flight, 0);
    let pending: Vec<String> = entries[state.cursor.min(entries.len())..]
        .iter()
        .map(|entry| entry.name().to_string())
        .collect();
    let (initialized, interfaces, failures, mut stranded, hooks) = state.into_parts();

    if !failures.is_empty() {
        if !stranded.is_empty() {
            log::warn!("Components never started because a dependency failed: {}", stranded.join(", "));
        }
        if !pending.is_empty() {
            log::warn!("Components left waiting on unstarted dependencies: {}", pending.join(", "));
            stranded.extend(pending);
        }
        return Err(AggregateInitializationError {
            failures,
            initialized,
            stranded,
        }
        .into());
    }
    if !pending.is_empty() {
        return Err(ExecutionError::Stalled { pending });
    }

    for (name, hook) in hooks {
        log::debug!("Running post-initialize hook of '{}'", name);
        hook();
    }
    log::info!("Initialized {} component(s)", initialized.len());
    Ok(RunReport::new(initialized, interfaces))
}

fn panic_error(payload: Box<dyn Any + Send>) -> BoxError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("initializer panicked: {}", message).into()
}

/// Build the union of the paths of `roots` and execute it.
pub async fn execute(
    loader: Arc<dyn ComponentLoader>,
    base_path: impl Into<PathBuf>,
    graph: &DependencyGraph,
    roots: &[NodeId],
    config_enabled: bool,
) -> Result<RunReport, ExecutionError> {
    let path = InitializationPath::from_roots(graph, roots)?;
    ExecutionEngine::new(loader)
        .with_base_path(base_path)
        .with_config(config_enabled)
        .execute(&path)
        .await
}
