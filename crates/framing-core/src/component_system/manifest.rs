use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::component_system::descriptor::ComponentDescriptor;
use crate::component_system::error::ComponentSystemError;

// --- Intermediate structs for deserialization ---

#[derive(Deserialize, Debug)]
struct RawPackageManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    framing: Option<RawFramingSection>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct RawFramingSection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    imports: Option<Vec<String>>,
    #[serde(default)]
    optional_imports: Option<Vec<String>>,
    #[serde(default)]
    sub_directories: Option<Vec<String>>,
}

// --- End Intermediate structs ---

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the contents of a component manifest (`package.json`).
///
/// Returns `Ok(None)` when the manifest has no `framing` section: the
/// directory holds an ordinary module, not a component. `component_path` is
/// the component directory relative to the base directory and becomes the
/// prefix of the entry path.
pub fn parse_manifest(
    content: &str,
    manifest_path: &Path,
    component_path: &Path,
) -> Result<Option<ComponentDescriptor>, ComponentSystemError> {
    let raw: RawPackageManifest = serde_json::from_str(content).map_err(|e| {
        ComponentSystemError::ManifestError {
            path: manifest_path.to_path_buf(),
            message: format!("Failed to parse manifest JSON: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    let Some(framing) = raw.framing else {
        return Ok(None);
    };

    let module_name = non_empty(raw.name);
    let name = non_empty(framing.name)
        .or_else(|| module_name.clone())
        .ok_or_else(|| ComponentSystemError::InvalidDescriptor {
            path: component_path.to_path_buf(),
            message: "name parameter is missing from package.json.".to_string(),
        })?;
    let main = non_empty(raw.main).ok_or_else(|| ComponentSystemError::InvalidDescriptor {
        path: component_path.to_path_buf(),
        message: "main parameter is missing from package.json.".to_string(),
    })?;

    let descriptor = ComponentDescriptor {
        module_name: module_name.unwrap_or_else(|| name.clone()),
        name,
        component_path: component_path.to_path_buf(),
        entry_path: component_path.join(main),
        imports: framing.imports.unwrap_or_default(),
        optional_imports: framing.optional_imports.unwrap_or_default(),
        sub_directories: framing
            .sub_directories
            .unwrap_or_default()
            .into_iter()
            .map(PathBuf::from)
            .collect(),
    };
    descriptor.validate()?;
    Ok(Some(descriptor))
}
