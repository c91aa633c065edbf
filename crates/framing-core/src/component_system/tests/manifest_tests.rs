// crates/framing-core/src/component_system/tests/manifest_tests.rs
#![cfg(test)]

use std::path::{Path, PathBuf};

use crate::component_system::error::ComponentSystemError;
use crate::component_system::manifest::parse_manifest;

fn parse(content: &str) -> Result<Option<crate::component_system::ComponentDescriptor>, ComponentSystemError> {
    parse_manifest(
        content,
        Path::new("components/server/package.json"),
        Path::new("components/server"),
    )
}

#[test]
fn test_parse_full_manifest() {
    let descriptor = parse(
        r#"{
            "name": "web-server",
            "main": "lib/index.js",
            "framing": {
                "name": "server",
                "imports": ["session-store"],
                "optionalImports": ["config"],
                "subDirectories": ["plugins"]
            }
        }"#,
    )
    .expect("parse ok")
    .expect("is a component");

    assert_eq!(descriptor.name, "server");
    assert_eq!(descriptor.module_name, "web-server");
    assert_eq!(descriptor.component_path, PathBuf::from("components/server"));
    assert_eq!(descriptor.entry_path, PathBuf::from("components/server/lib/index.js"));
    assert_eq!(descriptor.imports, vec!["session-store"]);
    assert_eq!(descriptor.optional_imports, vec!["config"]);
    assert_eq!(descriptor.sub_directories, vec![PathBuf::from("plugins")]);
}

#[test]
fn test_component_name_falls_back_to_module_name() {
    let descriptor = parse(r#"{ "name": "client", "main": "index", "framing": {} }"#)
        .unwrap()
        .unwrap();
    assert_eq!(descriptor.name, "client");
    assert_eq!(descriptor.module_name, "client");
    assert!(descriptor.imports.is_empty());
}

#[test]
fn test_manifest_without_framing_section_is_not_a_component() {
    let parsed = parse(r#"{ "name": "lodash", "main": "index.js" }"#).unwrap();
    assert!(parsed.is_none());
}

#[test]
fn test_missing_name_is_invalid() {
    let err = parse(r#"{ "main": "index.js", "framing": {} }"#).unwrap_err();
    match err {
        ComponentSystemError::InvalidDescriptor { message, .. } => {
            assert_eq!(message, "name parameter is missing from package.json.");
        }
        other => panic!("expected InvalidDescriptor, got {:?}", other),
    }
}

#[test]
fn test_missing_main_is_invalid() {
    let err = parse(r#"{ "name": "server", "framing": { "imports": [] } }"#).unwrap_err();
    match err {
        ComponentSystemError::InvalidDescriptor { message, .. } => {
            assert_eq!(message, "main parameter is missing from package.json.");
        }
        other => panic!("expected InvalidDescriptor, got {:?}", other),
    }
}

#[test]
fn test_malformed_json_is_manifest_error() {
    let err = parse("{ not json").unwrap_err();
    assert!(matches!(err, ComponentSystemError::ManifestError { .. }));
    assert!(err.to_string().contains("components/server/package.json"));
}
