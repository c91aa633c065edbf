use std::collections::{BTreeSet, HashMap};

use crate::component_system::descriptor::ComponentDescriptor;
use crate::dependency::error::GraphError;

/// Index of a node inside its [`DependencyGraph`].
pub type NodeId = usize;

/// One component in the graph.
///
/// `children` are the node's own dependencies, `parents` the nodes that
/// depend on it. A node without parents is a root.
#[derive(Debug, Clone)]
pub struct GraphNode {
    descriptor: ComponentDescriptor,
    dependency_count: usize,
    parents: BTreeSet<NodeId>,
    children: Vec<NodeId>,
}

impl GraphNode {
    fn new(descriptor: ComponentDescriptor) -> Self {
        Self {
            dependency_count: descriptor.dependency_count(),
            descriptor,
            parents: BTreeSet::new(),
            children: Vec::new(),
        }
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn dependency_count(&self) -> usize {
        self.dependency_count
    }

    pub fn parents(&self) -> &BTreeSet<NodeId> {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Dependency graph over a set of component descriptors.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. The graph
/// owns copies of the descriptors, so it can be reused across runs.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    lookup: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl DependencyGraph {
    /// Build the graph from descriptors in discovery precedence order.
    ///
    /// A descriptor whose name or module name was already registered by an
    /// earlier descriptor is skipped. Imports resolve against both keys.
    pub fn build(descriptors: &[ComponentDescriptor]) -> Result<Self, GraphError> {
        let mut graph = DependencyGraph::default();

        for descriptor in descriptors {
            if graph.lookup.contains_key(&descriptor.name)
                || graph.lookup.contains_key(&descriptor.module_name)
            {
                log::debug!(
                    "Skipping component '{}' ({}): a component with higher precedence is already loaded",
                    descriptor.name,
                    descriptor.module_name
                );
                continue;
            }
            let id = graph.nodes.len();
            graph.lookup.insert(descriptor.name.clone(), id);
            graph.lookup.insert(descriptor.module_name.clone(), id);
            graph.nodes.push(GraphNode::new(descriptor.clone()));
        }

        for id in 0..graph.nodes.len() {
            let descriptor = graph.nodes[id].descriptor.clone();
            for name in &descriptor.imports {
                graph.add_import(id, name, false)?;
            }
            for name in &descriptor.optional_imports {
                graph.add_import(id, name, true)?;
            }
        }

        graph.check_cycles()?;

        graph.roots = (0..graph.nodes.len())
            .filter(|&id| graph.nodes[id].is_root())
            .collect();
        log::debug!("Dependency graph roots: {:?}", graph.root_names());
        Ok(graph)
    }

    fn add_import(&mut self, id: NodeId, name: &str, optional: bool) -> Result<(), GraphError> {
        let Some(&target) = self.lookup.get(name) else {
            if optional {
                return Ok(());
            }
            return Err(GraphError::MissingDependency {
                component: self.nodes[id].descriptor.name.clone(),
                dependency: name.to_string(),
            });
        };
        if !self.nodes[id].children.contains(&target) {
            self.nodes[id].children.push(target);
        }
        self.nodes[target].parents.insert(id);
        Ok(())
    }

    fn check_cycles(&self) -> Result<(), GraphError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(
            graph: &DependencyGraph,
            id: NodeId,
            marks: &mut [Mark],
            stack: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            marks[id] = Mark::InProgress;
            stack.push(id);
            for &child in &graph.nodes[id].children {
                match marks[child] {
                    Mark::Done => {}
                    Mark::InProgress => {
                        let start = stack.iter().position(|&n| n == child).unwrap_or(0);
                        let mut cycle: Vec<String> = stack[start..]
                            .iter()
                            .map(|&n| graph.nodes[n].name().to_string())
                            .collect();
                        cycle.push(graph.nodes[child].name().to_string());
                        return Err(GraphError::CyclicDependency(cycle));
                    }
                    Mark::Unvisited => visit(graph, child, marks, stack)?,
                }
            }
            stack.pop();
            marks[id] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut stack = Vec::new();
        for id in 0..self.nodes.len() {
            if marks[id] == Mark::Unvisited {
                visit(self, id, &mut marks, &mut stack)?;
            }
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Resolve a component by name or module name.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.lookup.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&GraphNode> {
        self.lookup(name).and_then(|id| self.node(id))
    }

    /// All nodes, in precedence order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entry points: nodes nothing depends on, in precedence order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The root registered under `name` (or module name), if it is a root.
    pub fn root(&self, name: &str) -> Option<NodeId> {
        self.lookup(name).filter(|id| self.roots.contains(id))
    }

    pub fn root_names(&self) -> Vec<&str> {
        self.roots.iter().map(|&id| self.nodes[id].name()).collect()
    }

    /// Names of the direct dependencies of `id`.
    pub fn child_names(&self, id: NodeId) -> Vec<String> {
        self.node(id)
            .map(|node| {
                node.children
                    .iter()
                    .map(|&child| self.nodes[child].name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Build a [`DependencyGraph`]; see [`DependencyGraph::build`].
pub fn build_graph(descriptors: &[ComponentDescriptor]) -> Result<DependencyGraph, GraphError> {
    DependencyGraph::build(descriptors)
}
