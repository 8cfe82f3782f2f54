//! connect-config: sandboxed external configuration providers and worker
//! configuration assembly.
//!
//! - [`provider`] resolves `path` (+ optional keys) to [`ConfigData`] through a
//!   pluggable [`ConfigProvider`], with file access optionally confined to a root.
//! - [`worker`] loads a base properties file and layers `--override key=value`
//!   pairs on top of it.
//! - [`transform`] substitutes `${provider:path:key}` references using providers.

pub mod cli;
pub mod config;
pub mod error;
pub mod properties;
pub mod provider;
pub mod transform;
pub mod utils;
pub mod worker;

pub use error::{ConfigError, Result};
pub use provider::{
    ConfigData, ConfigProvider, DirectoryConfigProvider, FileConfigProvider, ProviderOptions,
    ProviderRegistry,
};
pub use transform::{ConfigTransformer, TransformResult};
pub use worker::{merge_overrides, props_from_args};
