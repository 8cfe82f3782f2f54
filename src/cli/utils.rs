//! Shared CLI utilities.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sorted `key=value` lines
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Render `key=value` lines in key order, one per line.
pub fn render_properties(props: &BTreeMap<String, String>) -> String {
    props.iter().map(|(key, value)| format!("{}={}\n", key, value)).collect()
}

pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sorted_lines() {
        let props = BTreeMap::from([
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "x=y".to_string()),
        ]);
        assert_eq!(render_properties(&props), "a=x=y\nb=2\n");
    }

    #[test]
    fn renders_empty_map_as_nothing() {
        assert_eq!(render_properties(&BTreeMap::new()), "");
    }
}
