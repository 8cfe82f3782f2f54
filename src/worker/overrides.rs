//! `--override key=value` parsing and merging

use crate::error::{ConfigError, Result};
use crate::properties::{load_properties, Properties};
use std::path::Path;
use std::str::FromStr;

pub const OVERRIDE_FLAG: &str = "--override";

/// A single `key=value` override. The value may itself contain `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub key: String,
    pub value: String,
}

impl FromStr for Override {
    type Err = ConfigError;

    fn from_str(pair: &str) -> Result<Self> {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                Ok(Self { key: key.to_string(), value: value.to_string() })
            }
            Some(_) => Err(ConfigError::MalformedOverride(format!("empty key in '{}'", pair))),
            None => Err(ConfigError::MalformedOverride(format!(
                "expected key=value after {} but found '{}'",
                OVERRIDE_FLAG, pair
            ))),
        }
    }
}

/// Parse the tokens after the base file into overrides, in argument order.
///
/// Tokens must come in `--override key=value` pairs; anything else fails.
pub fn parse_overrides<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Override>> {
    let mut overrides = Vec::with_capacity(tokens.len() / 2);
    let mut tokens = tokens.iter().map(AsRef::<str>::as_ref);

    while let Some(flag) = tokens.next() {
        if flag != OVERRIDE_FLAG {
            return Err(ConfigError::MalformedOverride(format!(
                "expected {} but found '{}'",
                OVERRIDE_FLAG, flag
            )));
        }
        let Some(pair) = tokens.next() else {
            return Err(ConfigError::MalformedOverride(format!(
                "{} must be followed by key=value",
                OVERRIDE_FLAG
            )));
        };
        overrides.push(pair.parse::<Override>()?);
    }
    Ok(overrides)
}

/// Layer override tokens onto `base`. Later overrides of the same key win.
pub fn merge_overrides<S: AsRef<str>>(base: Properties, tokens: &[S]) -> Result<Properties> {
    Ok(apply(base, parse_overrides(tokens)?))
}

/// Overrides win over `base`, and later overrides over earlier ones.
fn apply(mut base: Properties, overrides: Vec<Override>) -> Properties {
    for Override { key, value } in overrides {
        base.insert(key, value);
    }
    base
}

/// Effective worker properties from `<base-file> [--override key=value]...`.
///
/// Overrides are validated before the base file is read, and nothing is returned
/// unless both succeed.
pub fn props_from_args<S: AsRef<str>>(args: &[S]) -> Result<Properties> {
    let Some((base, tokens)) = args.split_first() else {
        return Err(ConfigError::MissingBaseFile);
    };
    let base: &str = base.as_ref();
    if base.is_empty() || base == OVERRIDE_FLAG {
        return Err(ConfigError::MissingBaseFile);
    }

    let overrides = parse_overrides(tokens)?;
    let props = load_properties(Path::new(base))?;
    tracing::debug!(
        "Loaded {} worker properties from {}, applying {} override(s)",
        props.len(),
        base,
        overrides.len()
    );
    Ok(apply(props, overrides))
}
