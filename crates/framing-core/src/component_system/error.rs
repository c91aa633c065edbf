//! # Framing Core Component System Errors
//!
//! [`ComponentSystemError`] covers everything that can go wrong before a
//! component's initializer runs: invalid descriptors, unreadable or malformed
//! manifests, discovery I/O and loader failures.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ComponentSystemError {
    #[error("Invalid component at '{}': {message}", path.display())]
    InvalidDescriptor {
        path: PathBuf,
        message: String,
    },

    #[error("Component manifest error for '{}': {message}", path.display())]
    ManifestError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error during '{operation}' on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Component loading failed for '{}': {message}", entry_path.display())]
    LoadingError {
        entry_path: PathBuf,
        message: String,
    },

    #[error("Component registration error for '{}': {message}", entry_path.display())]
    RegistrationError {
        entry_path: PathBuf,
        message: String,
    },
}

impl ComponentSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        ComponentSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
