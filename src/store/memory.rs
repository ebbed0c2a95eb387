//! In-process preference store.
//!
//! Holds the synced document and the legacy map in memory. Hosts that bring
//! their own persistence can seed it; the test suite uses it to inject
//! failures.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::document::SyncedDocument;
use super::legacy::LegacySnapshot;
use super::{new_custom_id, CustomItemStore, PreferenceStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    catalog, Item, ItemKind, ItemLists, MigrationRecord, MigrationStatus, PreferenceKey,
};

#[derive(Debug)]
struct MemoryState {
    builtin_themes: Vec<Item>,
    builtin_keys: Vec<Item>,
    synced: SyncedDocument,
    legacy: BTreeMap<String, String>,
    unavailable: bool,
    fail_migrations: bool,
    selection_writes: usize,
}

/// Preference store kept entirely in memory.
///
/// # Examples
///
/// ```
/// use newt_settings::models::{Item, ItemKind, PreferenceKey};
/// use newt_settings::store::MemoryStore;
///
/// let store = MemoryStore::new()
///     .with_customs(ItemKind::Theme, vec![Item::custom("customtheme-7", "Sunset")])
///     .with_selection(PreferenceKey::SelectedTheme, "customtheme-7");
/// assert_eq!(
///     store.stored_selection(PreferenceKey::SelectedTheme).as_deref(),
///     Some("customtheme-7")
/// );
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates a store with the bundled built-ins and no user data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                builtin_themes: catalog::builtins(ItemKind::Theme),
                builtin_keys: catalog::builtins(ItemKind::Shortcuts),
                synced: SyncedDocument::default(),
                legacy: BTreeMap::new(),
                unavailable: false,
                fail_migrations: false,
                selection_writes: 0,
            }),
        }
    }

    /// Replaces the built-in items of a kind.
    #[must_use]
    pub fn with_builtins(self, kind: ItemKind, items: Vec<Item>) -> Self {
        {
            let mut state = self.lock();
            match kind {
                ItemKind::Theme => state.builtin_themes = items,
                ItemKind::Shortcuts => state.builtin_keys = items,
            }
        }
        self
    }

    /// Replaces the custom items of a kind.
    #[must_use]
    pub fn with_customs(self, kind: ItemKind, items: Vec<Item>) -> Self {
        *self.lock().synced.customs_mut(kind) = items;
        self
    }

    /// Seeds a stored selection.
    #[must_use]
    pub fn with_selection(self, key: PreferenceKey, id: &str) -> Self {
        self.lock().synced.set_selection(key, id);
        self
    }

    /// Seeds the legacy local-storage map.
    #[must_use]
    pub fn with_legacy_entries(self, entries: BTreeMap<String, String>) -> Self {
        self.lock().legacy = entries;
        self
    }

    /// Makes every operation fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Makes only `migrate()` fail with [`StoreError::Unavailable`].
    pub fn set_fail_migrations(&self, fail: bool) {
        self.lock().fail_migrations = fail;
    }

    /// Returns the stored selection without going through the async contract.
    #[must_use]
    pub fn stored_selection(&self, key: PreferenceKey) -> Option<String> {
        self.lock().synced.selection(key).map(str::to_string)
    }

    /// Returns a copy of the legacy map.
    #[must_use]
    pub fn legacy_entries(&self) -> BTreeMap<String, String> {
        self.lock().legacy.clone()
    }

    /// Returns the migration record.
    #[must_use]
    pub fn migration_record(&self) -> MigrationRecord {
        self.lock().synced.migration.clone()
    }

    /// Number of selection writes served so far.
    #[must_use]
    pub fn selection_writes(&self) -> usize {
        self.lock().selection_writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self, kind: ItemKind) -> StoreResult<ItemLists> {
        let state = self.lock();
        state.check_available()?;
        let builtins = match kind {
            ItemKind::Theme => state.builtin_themes.clone(),
            ItemKind::Shortcuts => state.builtin_keys.clone(),
        };
        Ok(ItemLists {
            builtins,
            customs: state.synced.customs(kind).to_vec(),
        })
    }

    async fn get_selection(&self, key: PreferenceKey) -> StoreResult<Option<String>> {
        let state = self.lock();
        state.check_available()?;
        Ok(state.synced.selection(key).map(str::to_string))
    }

    async fn set_selection(&self, key: PreferenceKey, id: &str) -> StoreResult<()> {
        let mut state = self.lock();
        state.check_available()?;
        state.synced.set_selection(key, id);
        state.selection_writes += 1;
        Ok(())
    }

    async fn migrate(&self) -> StoreResult<MigrationStatus> {
        let mut state = self.lock();
        state.check_available()?;
        if state.fail_migrations {
            return Err(StoreError::Unavailable("sync storage rejected migration".to_string()));
        }

        let snapshot = LegacySnapshot::from_entries(&state.legacy)?;
        snapshot.check_builtin_ids(ItemKind::Theme, &state.builtin_themes)?;
        snapshot.check_builtin_ids(ItemKind::Shortcuts, &state.builtin_keys)?;
        Ok(state.synced.absorb_legacy(&snapshot, Utc::now()))
    }
}

impl CustomItemStore for MemoryStore {
    fn add_custom(&self, kind: ItemKind, name: &str) -> StoreResult<Item> {
        let mut state = self.lock();
        state.check_available()?;
        let item = Item::custom(&new_custom_id(kind), name);
        state.synced.customs_mut(kind).push(item.clone());
        Ok(item)
    }

    fn remove_custom(&self, kind: ItemKind, id: &str) -> StoreResult<Item> {
        let mut state = self.lock();
        state.check_available()?;
        state
            .synced
            .remove_custom(kind, id)
            .ok_or_else(|| StoreError::UnknownItem {
                kind,
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_your_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.get_selection(PreferenceKey::SelectedKey).await.unwrap(), None);

        store
            .set_selection(PreferenceKey::SelectedKey, "key-vim")
            .await
            .unwrap();
        assert_eq!(
            store.get_selection(PreferenceKey::SelectedKey).await.unwrap().as_deref(),
            Some("key-vim")
        );
        assert_eq!(store.selection_writes(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_builtins_and_customs() {
        let store = MemoryStore::new();
        let added = store.add_custom(ItemKind::Theme, "Sunset").unwrap();
        assert!(added.id.starts_with("customtheme-"));

        let lists = store.get(ItemKind::Theme).await.unwrap();
        assert_eq!(lists.builtins, catalog::builtins(ItemKind::Theme));
        assert_eq!(lists.customs, vec![added]);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(store.get(ItemKind::Theme).await.is_err());
        assert!(store.get_selection(PreferenceKey::SelectedTheme).await.is_err());
        assert!(store
            .set_selection(PreferenceKey::SelectedTheme, "theme-dark")
            .await
            .is_err());
        assert!(store.migrate().await.is_err());
    }

    #[test]
    fn test_remove_custom_rejects_builtin() {
        let store = MemoryStore::new();
        let err = store.remove_custom(ItemKind::Theme, "theme-light").unwrap_err();
        assert!(matches!(err, StoreError::UnknownItem { .. }));
    }
}
