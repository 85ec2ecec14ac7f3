//! Persisted console state.
//!
//! The on-disk record keeps the field names `fontSize`, `aliasMap` and
//! `eventMap`. Missing fields fall back to their defaults so older or
//! hand-edited files still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Font size written when nothing has been saved yet.
pub const DEFAULT_FONT_SIZE: i32 = 8;

/// Everything the console remembers between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub font_size: i32,
    pub alias_map: BTreeMap<String, String>,
    pub event_map: BTreeMap<String, String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            alias_map: BTreeMap::new(),
            event_map: BTreeMap::new(),
        }
    }
}

impl PersistedState {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
