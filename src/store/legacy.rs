//! Legacy local-storage preference format.
//!
//! The legacy scheme is a flat string map. Selections are stored as plain
//! strings; custom item lists are JSON arrays encoded into a string value.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{StoreError, StoreResult};
use crate::models::{Item, ItemKind, PreferenceKey};

/// Legacy key holding the JSON-encoded custom themes.
pub const KEY_CUSTOM_THEMES: &str = "customThemes";
/// Legacy key holding the JSON-encoded custom shortcut profiles.
pub const KEY_CUSTOM_KEYS: &str = "customKeys";

/// Entry of a legacy custom list. Theme and shortcut payloads are ignored.
#[derive(Debug, Deserialize)]
struct LegacyItem {
    id: String,
    name: String,
}

/// Parsed view of the legacy local-storage map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacySnapshot {
    /// Stored selections, by key
    pub selections: BTreeMap<PreferenceKey, String>,
    /// Custom themes
    pub custom_themes: Vec<Item>,
    /// Custom shortcut profiles
    pub custom_keys: Vec<Item>,
}

impl LegacySnapshot {
    /// Parses the legacy string map.
    ///
    /// Missing keys are treated as empty. A custom list that is present but
    /// not a JSON array of `{id, name}` objects is an error.
    pub fn from_entries(entries: &BTreeMap<String, String>) -> StoreResult<Self> {
        let mut selections = BTreeMap::new();
        for key in [PreferenceKey::SelectedTheme, PreferenceKey::SelectedKey] {
            if let Some(value) = entries.get(key.as_str()).filter(|value| !value.is_empty()) {
                selections.insert(key, value.clone());
            }
        }

        Ok(Self {
            selections,
            custom_themes: parse_custom_list(entries, KEY_CUSTOM_THEMES)?,
            custom_keys: parse_custom_list(entries, KEY_CUSTOM_KEYS)?,
        })
    }

    /// Returns the custom items of a kind.
    #[must_use]
    pub fn customs(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Theme => &self.custom_themes,
            ItemKind::Shortcuts => &self.custom_keys,
        }
    }

    /// Number of custom items across both kinds.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.custom_themes.len() + self.custom_keys.len()
    }

    /// Fails if a legacy custom item reuses the id of a built-in of its kind.
    ///
    /// Such a snapshot would leave the synced store with a duplicate id, so
    /// it is refused as a whole and nothing is copied.
    pub fn check_builtin_ids(&self, kind: ItemKind, builtins: &[Item]) -> StoreResult<()> {
        match self
            .customs(kind)
            .iter()
            .find(|custom| builtins.iter().any(|builtin| builtin.id == custom.id))
        {
            Some(clash) => Err(StoreError::LegacyConflict {
                kind,
                id: clash.id.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn parse_custom_list(entries: &BTreeMap<String, String>, key: &str) -> StoreResult<Vec<Item>> {
    let Some(raw) = entries.get(key).filter(|raw| !raw.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let items: Vec<LegacyItem> =
        serde_json::from_str(raw).map_err(|source| StoreError::LegacyFormat {
            key: key.to_string(),
            source,
        })?;

    // Everything in a legacy custom list is user-created, whatever it says.
    Ok(items
        .into_iter()
        .map(|item| Item::custom(&item.id, &item.name))
        .collect())
}
