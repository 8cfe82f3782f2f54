//! Worker command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::utils::{render_json, render_properties, OutputFormat};
use crate::provider::ProviderRegistry;
use crate::transform::ConfigTransformer;
use crate::worker::props_from_args;

#[derive(Args)]
pub struct WorkerArgs {
    /// Replace ${provider:path:key} references using the providers declared
    /// under config.providers in the merged properties
    #[arg(long)]
    pub resolve: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Base properties file, then any number of `--override key=value` pairs
    #[arg(
        value_name = "BASE [--override key=value]...",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

pub fn run(args: WorkerArgs) -> Result<()> {
    let props =
        props_from_args(args.args.as_slice()).context("Failed to assemble worker configuration")?;

    let props = if args.resolve {
        let registry = ProviderRegistry::from_worker_props(&props)
            .context("Failed to set up config providers")?;
        let result = ConfigTransformer::new(&registry)
            .transform(&props)
            .context("Failed to resolve config references")?;
        for (path, ttl) in &result.ttls {
            tracing::debug!("Config at '{}' should be refreshed within {} ms", path, ttl);
        }
        result.data
    } else {
        props
    };

    let output = match args.format {
        OutputFormat::Text => render_properties(&props),
        OutputFormat::Json => render_json(&props)?,
    };
    print!("{}", output);
    Ok(())
}
