//! Provider exposing each file of a directory as one entry

use super::{requested_path, root_option, ConfigData, ConfigProvider, ProviderOptions};
use crate::error::{ConfigError, Result};
use crate::utils::{CanonicalResolver, PathResolver, RootRestriction};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use walkdir::WalkDir;

/// Maps every regular file directly inside the directory at `path` to
/// `file name -> file contents`. Subdirectories are not descended into.
///
/// Uses the same `root` sandbox as [`super::FileConfigProvider`]; symlinked files
/// must also resolve inside it.
#[derive(Debug, Default)]
pub struct DirectoryConfigProvider<R: PathResolver = CanonicalResolver> {
    restriction: RootRestriction,
    resolver: R,
}

impl DirectoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: PathResolver> DirectoryConfigProvider<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { restriction: RootRestriction::unrestricted(), resolver }
    }

    fn read(&self, path: Option<&str>, keys: Option<&BTreeSet<String>>) -> Result<ConfigData> {
        let Some(path) = requested_path(path) else {
            return Ok(ConfigData::empty());
        };

        let dir = self.restriction.resolve(path, &self.resolver)?;
        if !dir.is_dir() {
            return Err(ConfigError::io(
                &dir,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        tracing::debug!("Reading config directory {} for path '{}'", dir.display(), path);

        let mut data = BTreeMap::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| {
                let location = e.path().unwrap_or(dir.as_path()).to_path_buf();
                ConfigError::io(location, e.into())
            })?;

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if keys.is_some_and(|keys| !keys.contains(name)) {
                continue;
            }

            if entry.path_is_symlink() {
                // dangling links and links to non-files are skipped like any other non-file
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => {}
                    _ => continue,
                }
                let display = format!("{}/{}", path, name);
                self.restriction.check(&display, entry.path(), &self.resolver)?;
            } else if !entry.file_type().is_file() {
                continue;
            }

            let value =
                fs::read_to_string(entry.path()).map_err(|e| ConfigError::io(entry.path(), e))?;
            data.insert(name.to_string(), value);
        }
        Ok(ConfigData::without_ttl(data))
    }
}

impl<R: PathResolver> ConfigProvider for DirectoryConfigProvider<R> {
    fn configure(&mut self, options: &ProviderOptions) -> Result<()> {
        self.restriction = match root_option(options)? {
            Some(root) => RootRestriction::new(&root, &self.resolver)?,
            None => RootRestriction::unrestricted(),
        };
        Ok(())
    }

    fn get(&self, path: Option<&str>) -> Result<ConfigData> {
        self.read(path, None)
    }

    fn get_keys(&self, path: Option<&str>, keys: &BTreeSet<String>) -> Result<ConfigData> {
        self.read(path, Some(keys))
    }
}
