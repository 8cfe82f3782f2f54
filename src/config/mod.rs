//! Tool settings loading
//!
//! Settings come from an explicit `--settings` file or one auto-discovered in the
//! working directory. They declare named providers for the `get` command.

pub mod loader;

pub use loader::{load_settings, ProviderSettings, Settings};
