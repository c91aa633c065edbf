// crates/framing-core/src/dependency/tests/graph_tests.rs
#![cfg(test)]

use crate::component_system::descriptor::{ComponentDescriptor, DescriptorBuilder};
use crate::dependency::error::GraphError;
use crate::dependency::graph::{build_graph, DependencyGraph};

fn component(name: &str, imports: &[&str]) -> ComponentDescriptor {
    DescriptorBuilder::new(name).imports(imports).build().unwrap()
}

fn assert_edges_consistent(graph: &DependencyGraph) {
    for (id, node) in graph.nodes() {
        for &child in node.children() {
            assert!(
                graph.node(child).unwrap().parents().contains(&id),
                "{} is a child of {} but not the other way round",
                graph.node(child).unwrap().name(),
                node.name()
            );
        }
        for &parent in node.parents() {
            assert!(
                graph.node(parent).unwrap().children().contains(&id),
                "{} is a parent of {} but not the other way round",
                graph.node(parent).unwrap().name(),
                node.name()
            );
        }
    }
}

#[test]
fn test_build_simple_graph() {
    let graph = build_graph(&[
        component("component", &["shared", "dependency"]),
        component("dependency", &["shared"]),
        component("shared", &[]),
    ])
    .expect("graph builds");

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.root_names(), vec!["component"]);
    assert_edges_consistent(&graph);

    let component_id = graph.lookup("component").unwrap();
    assert_eq!(graph.child_names(component_id), vec!["shared", "dependency"]);
    assert_eq!(graph.get("component").unwrap().dependency_count(), 2);

    let shared = graph.get("shared").unwrap();
    assert_eq!(shared.parents().len(), 2);
    assert!(!shared.is_root());
}

#[test]
fn test_missing_required_dependency_fails() {
    let err = build_graph(&[component("app", &["db"])]).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingDependency {
            component: "app".to_string(),
            dependency: "db".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Missing dependency db for app");
}

#[test]
fn test_missing_optional_dependency_is_skipped() {
    let app = DescriptorBuilder::new("app")
        .optional_import("metrics")
        .build()
        .unwrap();
    let graph = build_graph(&[app]).expect("optional imports never fail");
    let app = graph.get("app").unwrap();
    assert!(app.children().is_empty());
    // Declared imports still count toward the tie-break
    assert_eq!(app.dependency_count(), 1);
    assert_eq!(graph.root_names(), vec!["app"]);
}

#[test]
fn test_present_optional_dependency_adds_edge() {
    let app = DescriptorBuilder::new("app").optional_import("cache").build().unwrap();
    let graph = build_graph(&[app, component("cache", &[])]).unwrap();
    assert_eq!(graph.root_names(), vec!["app"]);
    assert_edges_consistent(&graph);
}

#[test]
fn test_first_seen_descriptor_wins() {
    let first = DescriptorBuilder::new("server")
        .module_name("server-module")
        .entry_path("first/index")
        .build()
        .unwrap();
    let same_name = DescriptorBuilder::new("server")
        .entry_path("second/index")
        .build()
        .unwrap();
    let same_module = DescriptorBuilder::new("other")
        .module_name("server-module")
        .entry_path("third/index")
        .build()
        .unwrap();

    let graph = build_graph(&[first, same_name, same_module]).unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.get("server").unwrap().descriptor().entry_path.to_str(), Some("first/index"));
    assert!(graph.get("other").is_none());
}

#[test]
fn test_import_by_module_name() {
    let store = DescriptorBuilder::new("store")
        .module_name("session-store")
        .build()
        .unwrap();
    let graph = build_graph(&[component("server", &["session-store"]), store]).unwrap();
    let server = graph.lookup("server").unwrap();
    assert_eq!(graph.child_names(server), vec!["store"]);
    assert_eq!(graph.lookup("session-store"), graph.lookup("store"));
}

#[test]
fn test_roots_in_precedence_order() {
    let graph = build_graph(&[
        component("b", &["shared"]),
        component("shared", &[]),
        component("a", &["shared"]),
        component("standalone", &[]),
    ])
    .unwrap();
    assert_eq!(graph.root_names(), vec!["b", "a", "standalone"]);
    assert!(graph.root("a").is_some());
    assert!(graph.root("shared").is_none());
    assert!(graph.root("unknown").is_none());
}

#[test]
fn test_cycle_is_rejected() {
    let err = build_graph(&[component("a", &["b"]), component("b", &["a"])]).unwrap_err();
    assert_eq!(
        err,
        GraphError::CyclicDependency(vec!["a".to_string(), "b".to_string(), "a".to_string()])
    );
    assert_eq!(err.to_string(), "Cyclic dependency detected: a -> b -> a");
}

#[test]
fn test_self_import_is_a_cycle() {
    let err = build_graph(&[component("loop", &["loop"])]).unwrap_err();
    assert!(matches!(err, GraphError::CyclicDependency(_)));
}

#[test]
fn test_empty_graph() {
    let graph = build_graph(&[]).unwrap();
    assert!(graph.is_empty());
    assert!(graph.roots().is_empty());
}
