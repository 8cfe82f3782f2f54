//! Get command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::utils::{render_json, render_properties, OutputFormat};
use crate::config::load_settings;
use crate::provider::{ProviderKind, ProviderOptions, ProviderRegistry, ROOT_OPTION};

#[derive(Args)]
pub struct GetArgs {
    /// Path to resolve; relative to --root when one is set
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Only return this key (repeatable)
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub keys: Vec<String>,

    /// Kind of provider to use when --provider is not given
    #[arg(long, value_name = "KIND", default_value = "file", conflicts_with = "provider")]
    pub kind: KindArg,

    /// Restrict reads to this directory
    #[arg(long, value_name = "DIR", conflicts_with = "provider")]
    pub root: Option<PathBuf>,

    /// Named provider from the settings file
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Settings file declaring providers (connect-config.toml or .yaml)
    #[arg(short = 's', long, value_name = "FILE", requires = "provider")]
    pub settings: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    File,
    Directory,
}

impl KindArg {
    /// Name the ad-hoc provider is registered under.
    pub fn as_str(self) -> &'static str {
        match self {
            KindArg::File => "file",
            KindArg::Directory => "directory",
        }
    }
}

impl From<KindArg> for ProviderKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::File => ProviderKind::File,
            KindArg::Directory => ProviderKind::Directory,
        }
    }
}

pub fn run(args: GetArgs) -> Result<()> {
    let (registry, name) = match &args.provider {
        Some(name) => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let settings = load_settings(&cwd, args.settings.as_deref())?;
            let registry = ProviderRegistry::from_settings(&settings)
                .context("Failed to set up providers from settings")?;
            (registry, name.clone())
        }
        None => {
            let mut options = ProviderOptions::new();
            if let Some(root) = &args.root {
                options.insert(
                    ROOT_OPTION.to_string(),
                    Value::String(root.to_string_lossy().into_owned()),
                );
            }
            let name = args.kind.as_str().to_string();
            let mut registry = ProviderRegistry::new();
            registry
                .configure_and_register(&name, args.kind.into(), &options)
                .context("Failed to configure provider")?;
            (registry, name)
        }
    };

    let provider =
        registry.get(&name).with_context(|| format!("No provider named '{}' is declared", name))?;

    let resolved = if args.keys.is_empty() {
        provider.get(Some(args.path.as_str()))
    } else {
        let keys: BTreeSet<String> = args.keys.iter().cloned().collect();
        provider.get_keys(Some(args.path.as_str()), &keys)
    };
    let data = resolved
        .with_context(|| format!("Failed to resolve '{}' with provider '{}'", args.path, name))?;

    let output = match args.format {
        OutputFormat::Text => render_properties(data.data()),
        OutputFormat::Json => render_json(&data)?,
    };
    print!("{}", output);
    Ok(())
}
