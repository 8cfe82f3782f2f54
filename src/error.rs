//! Error taxonomy for providers and worker config assembly

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The requested path resolves to a location outside the configured root.
    /// Never reported as `Io`.
    #[error("Access denied: '{path}' resolves outside of root {}", .root.display())]
    AccessDenied { path: String, root: PathBuf },

    #[error("Failed reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed properties in {} at line {line}: {reason}", .path.display())]
    Parse { path: PathBuf, line: usize, reason: String },

    #[error("Malformed override arguments: {0}")]
    MalformedOverride(String),

    #[error("Missing base properties file argument")]
    MissingBaseFile,

    #[error("Invalid provider option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Unknown config provider '{0}'")]
    UnknownProvider(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True for failures reading or parsing backing storage.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse { .. })
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}
