//! Named provider instances declared by worker properties or the settings file
//!
//! Worker properties declare providers as:
//!
//! ```text
//! config.providers=file,secrets
//! config.providers.file.class=FileConfigProvider
//! config.providers.file.param.root=/etc/connect
//! config.providers.secrets.class=directory
//! ```

use super::{ConfigProvider, DirectoryConfigProvider, FileConfigProvider, ProviderOptions};
use crate::config::Settings;
use crate::error::{ConfigError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const CONFIG_PROVIDERS: &str = "config.providers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    File,
    Directory,
}

impl ProviderKind {
    pub fn instantiate(self) -> Box<dyn ConfigProvider> {
        match self {
            Self::File => Box::new(FileConfigProvider::new()),
            Self::Directory => Box::new(DirectoryConfigProvider::new()),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    /// Accepts a short kind (`file`, `directory`) or a dotted class name whose
    /// last segment is `FileConfigProvider` / `DirectoryConfigProvider`.
    fn from_str(class: &str) -> Result<Self> {
        let simple = class.trim().rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
        match simple.as_str() {
            "file" | "fileconfigprovider" => Ok(Self::File),
            "directory" | "dir" | "directoryconfigprovider" => Ok(Self::Directory),
            _ => Err(ConfigError::UnknownProvider(class.to_string())),
        }
    }
}

/// Owns configured providers by name and closes all of them when dropped.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Box<dyn ConfigProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every provider listed under `config.providers`.
    pub fn from_worker_props(props: &BTreeMap<String, String>) -> Result<Self> {
        let mut registry = Self::new();
        let Some(names) = props.get(CONFIG_PROVIDERS) else {
            return Ok(registry);
        };

        for name in names.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let class_key = format!("{}.{}.class", CONFIG_PROVIDERS, name);
            let class = props.get(&class_key).ok_or_else(|| ConfigError::InvalidOption {
                key: class_key.clone(),
                reason: "missing provider class".to_string(),
            })?;
            let kind: ProviderKind = class.parse()?;

            let prefix = format!("{}.{}.param.", CONFIG_PROVIDERS, name);
            let options: ProviderOptions = props
                .iter()
                .filter_map(|(key, value)| {
                    key.strip_prefix(&prefix)
                        .map(|option| (option.to_string(), Value::String(value.clone())))
                })
                .collect();

            registry.configure_and_register(name, kind, &options)?;
        }
        Ok(registry)
    }

    /// Build every provider declared in the settings file.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut registry = Self::new();
        for (name, declared) in &settings.providers {
            let kind: ProviderKind = declared.class.parse()?;
            registry.configure_and_register(name, kind, &declared.params)?;
        }
        Ok(registry)
    }

    pub fn configure_and_register(
        &mut self,
        name: &str,
        kind: ProviderKind,
        options: &ProviderOptions,
    ) -> Result<()> {
        let mut provider = kind.instantiate();
        provider.configure(options)?;
        tracing::debug!("Registered {:?} config provider '{}'", kind, name);
        self.register(name, provider);
        Ok(())
    }

    /// Add a configured provider, closing any provider previously registered as `name`.
    pub fn register(&mut self, name: &str, provider: Box<dyn ConfigProvider>) {
        if let Some(mut previous) = self.providers.insert(name.to_string(), provider) {
            close_quietly(name, previous.as_mut());
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn ConfigProvider> {
        self.providers.get(name).map(|provider| provider.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Drop for ProviderRegistry {
    fn drop(&mut self) {
        for (name, provider) in self.providers.iter_mut() {
            close_quietly(name, provider.as_mut());
        }
    }
}

fn close_quietly(name: &str, provider: &mut dyn ConfigProvider) {
    if let Err(e) = provider.close() {
        tracing::warn!("Failed to close config provider '{}': {}", name, e);
    }
}
