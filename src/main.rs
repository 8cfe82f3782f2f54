//! connect-config: resolve sandboxed external configuration and assemble
//! worker properties from a base file plus command-line overrides.

use anyhow::Result;

fn main() -> Result<()> {
    connect_config::cli::run()
}
