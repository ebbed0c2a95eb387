//! Synced preference document shared by the bundled stores.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::legacy::LegacySnapshot;
use crate::models::{Item, ItemKind, MigrationRecord, MigrationStatus, PreferenceKey};

/// Contents of the synced store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedDocument {
    /// Legacy migration status
    #[serde(default)]
    pub migration: MigrationRecord,
    /// Selections keyed by preference key name
    #[serde(default)]
    pub selections: BTreeMap<String, String>,
    /// Custom themes, in creation order
    #[serde(default)]
    pub custom_themes: Vec<Item>,
    /// Custom shortcut profiles, in creation order
    #[serde(default)]
    pub custom_keys: Vec<Item>,
}

impl SyncedDocument {
    /// Returns the custom items of a kind.
    #[must_use]
    pub fn customs(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Theme => &self.custom_themes,
            ItemKind::Shortcuts => &self.custom_keys,
        }
    }

    /// Returns the custom items of a kind for modification.
    pub fn customs_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Theme => &mut self.custom_themes,
            ItemKind::Shortcuts => &mut self.custom_keys,
        }
    }

    /// Returns the stored selection for a key.
    #[must_use]
    pub fn selection(&self, key: PreferenceKey) -> Option<&str> {
        self.selections.get(key.as_str()).map(String::as_str)
    }

    /// Stores a selection.
    pub fn set_selection(&mut self, key: PreferenceKey, id: &str) {
        self.selections.insert(key.as_str().to_string(), id.to_string());
    }

    /// Removes a custom item, returning it if it existed.
    pub fn remove_custom(&mut self, kind: ItemKind, id: &str) -> Option<Item> {
        let customs = self.customs_mut(kind);
        let index = customs.iter().position(|item| item.id == id)?;
        Some(customs.remove(index))
    }

    /// Copies a legacy snapshot into this document and marks the migration.
    ///
    /// Legacy selections overwrite synced ones. Legacy custom items replace
    /// synced items with the same id and are appended otherwise, so applying
    /// the same snapshot twice leaves the items and selections unchanged.
    pub fn absorb_legacy(&mut self, snapshot: &LegacySnapshot, at: DateTime<Utc>) -> MigrationStatus {
        for (key, id) in &snapshot.selections {
            self.set_selection(*key, id);
        }

        for kind in ItemKind::all() {
            let customs = self.customs_mut(kind);
            for item in snapshot.customs(kind) {
                match customs.iter_mut().find(|existing| existing.id == item.id) {
                    Some(existing) => existing.clone_from(item),
                    None => customs.push(item.clone()),
                }
            }
        }

        self.migration.mark_migrated(at);

        MigrationStatus::Migrated {
            items_copied: snapshot.item_count(),
            selections_copied: snapshot.selections.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LegacySnapshot {
        let mut snapshot = LegacySnapshot::default();
        snapshot
            .selections
            .insert(PreferenceKey::SelectedTheme, "customtheme-1".to_string());
        snapshot.custom_themes = vec![Item::custom("customtheme-1", "Legacy One")];
        snapshot
    }

    #[test]
    fn test_absorb_legacy_merges_by_id() {
        let mut doc = SyncedDocument::default();
        doc.custom_themes = vec![
            Item::custom("customtheme-1", "Old Name"),
            Item::custom("customtheme-2", "Synced Only"),
        ];
        doc.set_selection(PreferenceKey::SelectedTheme, "theme-dark");

        let status = doc.absorb_legacy(&snapshot(), Utc::now());

        assert_eq!(
            status,
            MigrationStatus::Migrated {
                items_copied: 1,
                selections_copied: 1
            }
        );
        assert_eq!(
            doc.custom_themes,
            vec![
                Item::custom("customtheme-1", "Legacy One"),
                Item::custom("customtheme-2", "Synced Only"),
            ]
        );
        assert_eq!(doc.selection(PreferenceKey::SelectedTheme), Some("customtheme-1"));
        assert!(doc.migration.is_current());
    }

    #[test]
    fn test_absorb_legacy_twice_is_stable() {
        let now = Utc::now();
        let mut once = SyncedDocument::default();
        once.absorb_legacy(&snapshot(), now);

        let mut twice = once.clone();
        twice.absorb_legacy(&snapshot(), now);

        assert_eq!(once.custom_themes, twice.custom_themes);
        assert_eq!(once.selections, twice.selections);
        assert_eq!(twice.migration.runs, 2);
    }

    #[test]
    fn test_remove_custom() {
        let mut doc = SyncedDocument::default();
        doc.custom_keys = vec![Item::custom("customkey-1", "Mine")];

        assert_eq!(doc.remove_custom(ItemKind::Shortcuts, "key-vim"), None);
        assert!(doc.remove_custom(ItemKind::Shortcuts, "customkey-1").is_some());
        assert!(doc.custom_keys.is_empty());
    }
}
