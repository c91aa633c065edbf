//! # Framing Core Storage
//!
//! Configuration plumbing shared by the runner and by components:
//!
//! - **[`config`]**: [`ConfigData`], the value handed to components that accept
//!   configuration, and [`ConfigFormat`] detection/parsing for JSON, YAML and TOML.
//! - **[`settings`]**: [`FramingSettings`], the runner's own settings file.
//! - **[`provider`]**: [`FileConfigProvider`] and [`ConfigComponent`], a file-backed
//!   implementation of the reserved `config` component.
//! - **[`error`]**: [`StorageSystemError`](error::StorageSystemError).
pub mod config;
pub mod error;
pub mod provider;
pub mod settings;

pub use config::{ConfigData, ConfigFormat};
pub use error::StorageSystemError;
pub use provider::{ConfigComponent, FileConfigProvider};
pub use settings::FramingSettings;
