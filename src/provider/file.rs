//! Provider backed by properties files on local storage

use super::{requested_path, root_option, ConfigData, ConfigProvider, ProviderOptions};
use crate::error::Result;
use crate::properties::load_properties;
use crate::utils::{CanonicalResolver, PathResolver, RootRestriction};
use std::collections::BTreeSet;

/// Reads `key=value` properties files, optionally sandboxed to a `root` directory.
///
/// Without `root`, any path the process can reach is readable.
#[derive(Debug, Default)]
pub struct FileConfigProvider<R: PathResolver = CanonicalResolver> {
    restriction: RootRestriction,
    resolver: R,
}

impl FileConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: PathResolver> FileConfigProvider<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { restriction: RootRestriction::unrestricted(), resolver }
    }

    pub fn restriction(&self) -> &RootRestriction {
        &self.restriction
    }

    fn read(&self, path: Option<&str>, keys: Option<&BTreeSet<String>>) -> Result<ConfigData> {
        let Some(path) = requested_path(path) else {
            return Ok(ConfigData::empty());
        };

        let location = self.restriction.resolve(path, &self.resolver)?;
        tracing::debug!("Reading config file {} for path '{}'", location.display(), path);

        let mut props = load_properties(&location)?;
        if let Some(keys) = keys {
            props.retain(|key, _| keys.contains(key));
        }
        Ok(ConfigData::without_ttl(props))
    }
}

impl<R: PathResolver> ConfigProvider for FileConfigProvider<R> {
    fn configure(&mut self, options: &ProviderOptions) -> Result<()> {
        self.restriction = match root_option(options)? {
            Some(root) => RootRestriction::new(&root, &self.resolver)?,
            None => RootRestriction::unrestricted(),
        };
        tracing::debug!("Configured file provider with root {:?}", self.restriction.root());
        Ok(())
    }

    fn get(&self, path: Option<&str>) -> Result<ConfigData> {
        self.read(path, None)
    }

    fn get_keys(&self, path: Option<&str>, keys: &BTreeSet<String>) -> Result<ConfigData> {
        self.read(path, Some(keys))
    }
}
