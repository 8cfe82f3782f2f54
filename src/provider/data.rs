//! Resolved configuration snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value pairs resolved by a provider, plus an optional refresh hint in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    data: BTreeMap<String, String>,
    ttl: Option<i64>,
}

impl ConfigData {
    pub fn new(data: BTreeMap<String, String>, ttl: Option<i64>) -> Self {
        Self { data, ttl }
    }

    /// Data with no refresh hint.
    pub fn without_ttl(data: BTreeMap<String, String>) -> Self {
        Self::new(data, None)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn ttl(&self) -> Option<i64> {
        self.ttl
    }

    pub fn into_data(self) -> BTreeMap<String, String> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
