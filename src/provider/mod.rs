//! Pluggable external configuration providers
//!
//! A provider resolves a logical path (plus an optional key filter) to a
//! [`ConfigData`] snapshot. Every provider returns empty data for an absent or
//! empty path without touching its backing store.

use crate::error::{ConfigError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub mod data;
pub mod directory;
pub mod file;
pub mod registry;

pub use data::ConfigData;
pub use directory::DirectoryConfigProvider;
pub use file::FileConfigProvider;
pub use registry::{ProviderKind, ProviderRegistry};

/// Options handed to [`ConfigProvider::configure`]. Unrecognized keys are ignored.
pub type ProviderOptions = BTreeMap<String, Value>;

/// Sandbox directory for file-backed providers.
pub const ROOT_OPTION: &str = "root";

pub trait ConfigProvider: Send + Sync {
    /// One-time setup before the first `get`.
    fn configure(&mut self, options: &ProviderOptions) -> Result<()>;

    /// Resolve every key found at `path`.
    fn get(&self, path: Option<&str>) -> Result<ConfigData>;

    /// Resolve only the requested `keys` found at `path`. Missing keys are left out.
    fn get_keys(&self, path: Option<&str>, keys: &BTreeSet<String>) -> Result<ConfigData>;

    /// Release held resources. Must succeed for a provider that was never used.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// `None` for an absent or empty path.
pub(crate) fn requested_path(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.is_empty())
}

pub(crate) fn root_option(options: &ProviderOptions) -> Result<Option<PathBuf>> {
    match options.get(ROOT_OPTION) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(root)) if root.trim().is_empty() => Err(ConfigError::InvalidOption {
            key: ROOT_OPTION.to_string(),
            reason: "must not be empty".to_string(),
        }),
        Some(Value::String(root)) => Ok(Some(PathBuf::from(root))),
        Some(other) => Err(ConfigError::InvalidOption {
            key: ROOT_OPTION.to_string(),
            reason: format!("expected a directory path string, got {}", other),
        }),
    }
}
