use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::initialization::error::PathError;
use crate::initialization::path::{InitializationPath, PathEntry};
use crate::kernel::constants::PLAN_FORMAT_VERSION;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument {
    format_version: u32,
    entries: Vec<PathEntry>,
}

/// Forward-slash form of `path`, so plans read the same on every platform.
pub fn clean_path(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}

/// Serialize `path` as a JSON plan.
pub fn write_plan<W: Write>(writer: W, path: &InitializationPath) -> Result<(), PathError> {
    let entries = path
        .entries()
        .iter()
        .cloned()
        .map(|mut entry| {
            entry.descriptor.component_path = clean_path(&entry.descriptor.component_path);
            entry.descriptor.entry_path = clean_path(&entry.descriptor.entry_path);
            entry
        })
        .collect();
    let document = PlanDocument {
        format_version: PLAN_FORMAT_VERSION,
        entries,
    };
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// Read a plan written by [`write_plan`].
///
/// The entries are kept in file order and must form a valid path.
pub fn read_plan<R: Read>(reader: R) -> Result<InitializationPath, PathError> {
    let document: PlanDocument = serde_json::from_reader(reader)?;
    if document.format_version != PLAN_FORMAT_VERSION {
        return Err(PathError::UnsupportedFormatVersion {
            found: document.format_version,
            expected: PLAN_FORMAT_VERSION,
        });
    }
    let path = InitializationPath::from_plan_entries(document.entries);
    path.validate()?;
    Ok(path)
}
