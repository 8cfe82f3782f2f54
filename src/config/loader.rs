//! Settings file loading

use crate::provider::ProviderOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Section name the settings may be nested under inside a larger file.
const SECTION: &str = "connect-config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub providers: BTreeMap<String, ProviderSettings>,
}

/// One named provider: its kind (`file`, `directory` or a provider class name)
/// and the options passed to `configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub class: String,
    #[serde(default)]
    pub params: ProviderOptions,
}

pub fn load_settings(dir: &Path, settings_path: Option<&Path>) -> Result<Settings> {
    let settings_path_provided = settings_path.is_some();

    let discovered = match settings_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_settings(dir),
    };

    let Some(settings_file) = discovered else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(&settings_file)
        .with_context(|| format!("Failed reading settings file: {}", settings_file.display()))?;

    let ext =
        settings_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_settings(&content, &settings_file),
        "yaml" | "yml" => parse_yaml_settings(&content, &settings_file),
        other => Err(anyhow::anyhow!(
            "Unsupported settings extension '.{}' for file {}",
            other,
            settings_file.display()
        )),
    };

    match parsed {
        Ok(settings) => {
            tracing::debug!(
                "Loaded {} provider(s) from {}",
                settings.providers.len(),
                settings_file.display()
            );
            Ok(settings)
        }
        Err(e) if settings_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Ignoring auto-discovered settings {}: {:#}",
                settings_file.display(),
                e
            );
            Ok(Settings::default())
        }
    }
}

/// Parse TOML settings, either top-level or nested under `[connect-config]`.
fn parse_toml_settings(content: &str, settings_file: &Path) -> Result<Settings> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", settings_file.display()))?;

    let settings_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    settings_val
        .try_into()
        .with_context(|| format!("Invalid TOML settings: {}", settings_file.display()))
}

/// Parse YAML settings, either top-level or nested under `connect-config`.
fn parse_yaml_settings(content: &str, settings_file: &Path) -> Result<Settings> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", settings_file.display()))?;

    let settings_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(settings_val)
        .with_context(|| format!("Invalid YAML settings: {}", settings_file.display()))
}

fn discover_settings(dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "connect-config.toml",
        ".connect-config.toml",
        "connect-config.yaml",
        "connect-config.yml",
    ];

    candidates.iter().map(|candidate| dir.join(candidate)).find(|path| path.is_file())
}
