use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::component_system::descriptor::ComponentDescriptor;
use crate::dependency::graph::{DependencyGraph, NodeId};
use crate::initialization::error::PathError;

/// One component's slot in an [`InitializationPath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEntry {
    /// Relative depth; larger levels initialize earlier
    pub level: usize,
    /// Declared import count, the tie-break among equal levels
    pub dependency_count: usize,
    /// Names that must be initialized before this entry may start
    pub dependency_names: Vec<String>,
    pub descriptor: ComponentDescriptor,
}

impl PathEntry {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Ordered, deduplicated sequence of components in which every dependency
/// precedes its dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitializationPath {
    entries: Vec<PathEntry>,
}

impl InitializationPath {
    /// Build the path rooted at `node`.
    pub fn build(graph: &DependencyGraph, node: NodeId) -> Result<Self, PathError> {
        let entries = build_entries(graph, node, 0)?;
        log::debug!(
            "Built initialization path for '{}': {:?}",
            graph.node(node).map(|n| n.name()).unwrap_or_default(),
            entries.iter().map(PathEntry::name).collect::<Vec<_>>()
        );
        Ok(Self { entries })
    }

    /// Build one path per root and union them in order.
    pub fn from_roots(graph: &DependencyGraph, roots: &[NodeId]) -> Result<Self, PathError> {
        let mut path = Self::default();
        for &root in roots {
            path = path.union(&Self::build(graph, root)?);
        }
        Ok(path)
    }

    /// Sort and deduplicate `entries` into a path. No dependency check is
    /// made; see [`validate`](Self::validate).
    pub fn from_entries(entries: Vec<PathEntry>) -> Self {
        Self { entries: normalize(entries) }
    }

    /// Merge `other` into a copy of this path.
    ///
    /// An entry of `other` that is deeper than its counterpart here raises
    /// the counterpart and everything after it by the difference; entries
    /// missing here are appended. Dependencies left at or below a dependent's
    /// level are then lifted above it before re-sorting and deduplicating.
    pub fn union(&self, other: &InitializationPath) -> InitializationPath {
        let mut entries = self.entries.clone();
        for theirs in &other.entries {
            match entries.iter().position(|ours| ours.name() == theirs.name()) {
                Some(index) => {
                    let ours = entries[index].level;
                    if theirs.level > ours {
                        let diff = theirs.level - ours;
                        for entry in &mut entries[index..] {
                            entry.level += diff;
                        }
                    }
                }
                None => entries.push(theirs.clone()),
            }
        }
        raise_dependencies(&mut entries);
        Self::from_entries(entries)
    }

    /// Keep `entries` in the given order; used for precomputed plans.
    pub(crate) fn from_plan_entries(entries: Vec<PathEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PathEntry> {
        self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(PathEntry::name).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that names are unique and that every dependency name occurs
    /// earlier in the path.
    pub fn validate(&self) -> Result<(), PathError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if let Some(missing) = entry
                .dependency_names
                .iter()
                .find(|dependency| !seen.contains(dependency.as_str()))
            {
                return Err(PathError::UnresolvedDependency {
                    component: entry.name().to_string(),
                    dependency: missing.clone(),
                });
            }
            if !seen.insert(entry.name()) {
                return Err(PathError::DuplicateEntry(entry.name().to_string()));
            }
        }
        Ok(())
    }
}

fn build_entries(
    graph: &DependencyGraph,
    id: NodeId,
    level: usize,
) -> Result<Vec<PathEntry>, PathError> {
    let node = graph.node(id).ok_or(PathError::UnknownNode(id))?;

    let mut sub_paths = Vec::with_capacity(node.children().len());
    for &child in node.children() {
        let sub_path = build_entries(graph, child, level + 1)?;
        if !sub_path.is_empty() {
            sub_paths.push(sub_path);
        }
    }

    // Sub-paths are sorted, so their first entry is their deepest.
    let max_level = sub_paths.iter().map(|p| p[0].level).max().unwrap_or(level);
    for sub_path in &mut sub_paths {
        let shift = max_level - sub_path[0].level;
        if shift > 0 {
            for entry in sub_path.iter_mut() {
                entry.level += shift;
            }
        }
    }

    let mut entries: Vec<PathEntry> = sub_paths.into_iter().flatten().collect();
    entries.push(PathEntry {
        level,
        dependency_count: node.dependency_count(),
        dependency_names: graph.child_names(id),
        descriptor: node.descriptor().clone(),
    });
    Ok(normalize(entries))
}

/// Lift every dependency to at least one level above each of its
/// dependents, repeating until levels settle.
fn raise_dependencies(entries: &mut [PathEntry]) {
    let mut index = HashMap::with_capacity(entries.len() * 2);
    for (i, entry) in entries.iter().enumerate() {
        index.entry(entry.descriptor.module_name.clone()).or_insert(i);
    }
    for (i, entry) in entries.iter().enumerate() {
        index.insert(entry.descriptor.name.clone(), i);
    }

    let edges: Vec<(usize, usize)> = entries
        .iter()
        .enumerate()
        .flat_map(|(dependent, entry)| {
            entry
                .dependency_names
                .iter()
                .filter_map(|name| index.get(name).copied())
                .filter(move |&dependency| dependency != dependent)
                .map(move |dependency| (dependent, dependency))
                .collect::<Vec<_>>()
        })
        .collect();

    // A chain is at most `len` entries long, so acyclic input settles within
    // `len` passes.
    for _ in 0..=entries.len() {
        let mut changed = false;
        for &(dependent, dependency) in &edges {
            let floor = entries[dependent].level + 1;
            if entries[dependency].level < floor {
                entries[dependency].level = floor;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Stable sort by level descending then dependency count ascending, keeping
/// the first entry of each name.
fn normalize(mut entries: Vec<PathEntry>) -> Vec<PathEntry> {
    entries.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then(a.dependency_count.cmp(&b.dependency_count))
    });
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.descriptor.name.clone()));
    entries
}

/// Build the initialization path rooted at `node`.
pub fn build_initialization_path(
    graph: &DependencyGraph,
    node: NodeId,
) -> Result<InitializationPath, PathError> {
    InitializationPath::build(graph, node)
}

/// Union two initialization paths; see [`InitializationPath::union`].
pub fn union_paths(a: &InitializationPath, b: &InitializationPath) -> InitializationPath {
    a.union(b)
}
