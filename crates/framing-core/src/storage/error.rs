//! # Framing Core Storage Errors
//!
//! Defines error types for reading configuration and settings files.
//!
//! [`StorageSystemError`] covers file I/O, unsupported configuration formats
//! and (de)serialization failures in any of the supported formats.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return StorageSystemError::FileNotFound(path);
        }
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
