//! `key=value` properties loading
//!
//! Parsing (comments, continuation lines, separators, escapes) is delegated to
//! `java-properties`; this module owns the file access policy and error mapping.

use crate::error::{ConfigError, Result};
use java_properties::{PropertiesError, PropertiesIter};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

pub type Properties = BTreeMap<String, String>;

/// Read and parse the properties file at `path`.
///
/// The handle is dropped before parsing starts, so it is released on every exit path.
pub fn load_properties(path: &Path) -> Result<Properties> {
    let content = read_text(path)?;
    parse_properties(&content, path)
}

fn read_text(path: &Path) -> Result<String> {
    // Opening a FIFO or device for reading can block, so reject non-files up front.
    let metadata = fs::metadata(path).map_err(|e| ConfigError::io(path, e))?;
    if !metadata.is_file() {
        return Err(not_a_file(path));
    }

    let mut file = File::open(path).map_err(|e| ConfigError::io(path, e))?;
    let metadata = file.metadata().map_err(|e| ConfigError::io(path, e))?;
    if !metadata.is_file() {
        return Err(not_a_file(path));
    }
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(|e| ConfigError::io(path, e))?;
    Ok(content)
}

fn not_a_file(path: &Path) -> ConfigError {
    ConfigError::io(path, io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"))
}

/// Parse properties text. `source` is only used for error reporting.
///
/// Later entries for the same key replace earlier ones.
pub fn parse_properties(text: &str, source: &Path) -> Result<Properties> {
    let mut props = Properties::new();
    PropertiesIter::new_with_encoding(text.as_bytes(), encoding_rs::UTF_8)
        .read_into(|key, value| {
            props.insert(key, value);
        })
        .map_err(|e| parse_error(source, &e))?;
    Ok(props)
}

fn parse_error(source: &Path, err: &PropertiesError) -> ConfigError {
    ConfigError::Parse {
        path: source.to_path_buf(),
        line: err.line_number().unwrap_or_default(),
        reason: err.to_string(),
    }
}
