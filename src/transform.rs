//! `${provider:path:key}` substitution in config values
//!
//! References are grouped so each provider is asked once per path for all the keys
//! referenced under it. Anything that does not resolve is left as written.

use crate::error::Result;
use crate::provider::ProviderRegistry;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};

/// `${provider:path:key}`, or `${provider:key}` for an empty path.
static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*?):(([^}]*?):)?([^}]*?)\}").expect("valid regex"));

/// provider name -> path -> resolved key/values
type Lookups<'a> = BTreeMap<&'a str, BTreeMap<&'a str, BTreeMap<String, String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Variable<'a> {
    provider: &'a str,
    path: &'a str,
    key: &'a str,
}

impl<'a> Variable<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        Self { provider: group(1), path: group(3), key: group(4) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformResult {
    /// The input configs with every resolvable reference replaced.
    pub data: BTreeMap<String, String>,
    /// Refresh hints (ms) per provider path, for lookups that carried a non-negative one.
    pub ttls: BTreeMap<String, i64>,
}

pub struct ConfigTransformer<'r> {
    registry: &'r ProviderRegistry,
}

impl<'r> ConfigTransformer<'r> {
    pub fn new(registry: &'r ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn transform(&self, configs: &BTreeMap<String, String>) -> Result<TransformResult> {
        let mut wanted: BTreeMap<&str, BTreeMap<&str, BTreeSet<String>>> = BTreeMap::new();
        for value in configs.values() {
            for caps in VARIABLE.captures_iter(value) {
                let var = Variable::from_captures(&caps);
                wanted
                    .entry(var.provider)
                    .or_default()
                    .entry(var.path)
                    .or_default()
                    .insert(var.key.to_string());
            }
        }

        let mut lookups: Lookups<'_> = BTreeMap::new();
        let mut ttls = BTreeMap::new();
        for (provider_name, paths) in wanted {
            let Some(provider) = self.registry.get(provider_name) else {
                tracing::debug!("No config provider named '{}', skipping", provider_name);
                continue;
            };
            for (path, keys) in paths {
                let resolved = provider.get_keys(Some(path), &keys)?;
                if let Some(ttl) = resolved.ttl().filter(|ttl| *ttl >= 0) {
                    ttls.insert(path.to_string(), ttl);
                }
                lookups.entry(provider_name).or_default().insert(path, resolved.into_data());
            }
        }

        let data = configs
            .iter()
            .map(|(key, value)| (key.clone(), substitute(value, &lookups)))
            .collect();
        Ok(TransformResult { data, ttls })
    }
}

fn substitute(value: &str, lookups: &Lookups<'_>) -> String {
    VARIABLE
        .replace_all(value, |caps: &Captures| {
            let var = Variable::from_captures(caps);
            lookups
                .get(var.provider)
                .and_then(|paths| paths.get(var.path))
                .and_then(|data| data.get(var.key))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
