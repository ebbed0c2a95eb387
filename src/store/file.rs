//! Directory-backed preference store.
//!
//! Emulates the two browser storage engines with two files in a data
//! directory:
//!
//! - `legacy.json`: the legacy local-storage string map (read-only here)
//! - `sync.json`: the synced document (selections, custom items, migration record)
//!
//! Writers take an exclusive advisory lock on `sync.lock` for the whole
//! read-modify-write, so stores in other threads or processes never lose
//! each other's updates.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fd_lock::RwLock;
use tempfile::NamedTempFile;

use super::document::SyncedDocument;
use super::legacy::LegacySnapshot;
use super::{new_custom_id, CustomItemStore, PreferenceStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{catalog, Item, ItemKind, ItemLists, MigrationStatus, PreferenceKey};

/// File name of the legacy local-storage map.
pub const LEGACY_FILE: &str = "legacy.json";
/// File name of the synced document.
pub const SYNCED_FILE: &str = "sync.json";
/// File locked while the synced document is rewritten.
pub const LOCK_FILE: &str = "sync.lock";

/// Preference store persisted as JSON files in a directory.
///
/// Every operation reads the synced document from disk and every write
/// replaces it atomically under the directory lock, so any number of stores
/// opened on the same directory observe each other's writes.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl FileStore {
    /// Opens a store in `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(io_error(&data_dir))?;

        tracing::debug!(path = %data_dir.display(), "opened file preference store");

        Ok(Self { data_dir })
    }

    /// Directory holding the store files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the legacy local-storage map.
    #[must_use]
    pub fn legacy_path(&self) -> PathBuf {
        self.data_dir.join(LEGACY_FILE)
    }

    /// Path of the synced document.
    #[must_use]
    pub fn synced_path(&self) -> PathBuf {
        self.data_dir.join(SYNCED_FILE)
    }

    /// Runs the implicit first-run migration if the record is not current.
    ///
    /// A missing legacy file counts as an empty legacy store: the record is
    /// still created so the check is not repeated.
    pub fn ensure_migrated(&self) -> StoreResult<MigrationStatus> {
        self.update(|doc| {
            if doc.migration.is_current() {
                return Ok((MigrationStatus::AlreadyCurrent, false));
            }
            let status = self.absorb_legacy(doc)?;
            tracing::info!(?status, "first-run legacy migration applied");
            Ok((status, true))
        })
    }

    /// Reads the legacy map. A missing file is an empty map.
    pub fn read_legacy_entries(&self) -> StoreResult<BTreeMap<String, String>> {
        let path = self.legacy_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(io_error(&path))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }

    /// Reads the synced document. A missing file is an empty document.
    pub fn load_synced(&self) -> StoreResult<SyncedDocument> {
        let path = self.synced_path();
        if !path.exists() {
            return Ok(SyncedDocument::default());
        }
        let content = fs::read_to_string(&path).map_err(io_error(&path))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }

    /// Read-modify-write of the synced document under the directory lock.
    ///
    /// `apply` returns its result and whether the document must be saved.
    fn update<T>(
        &self,
        apply: impl FnOnce(&mut SyncedDocument) -> StoreResult<(T, bool)>,
    ) -> StoreResult<T> {
        let lock_path = self.data_dir.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(io_error(&lock_path))?;
        let mut lock: RwLock<File> = RwLock::new(lock_file);
        let _guard = lock.write().map_err(io_error(&lock_path))?;

        let mut doc = self.load_synced()?;
        let (result, changed) = apply(&mut doc)?;
        if changed {
            self.save_synced(&doc)?;
        }
        Ok(result)
    }

    /// Writes the synced document through a unique temp file + rename.
    fn save_synced(&self, doc: &SyncedDocument) -> StoreResult<()> {
        let path = self.synced_path();
        let content = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut temp = NamedTempFile::new_in(&self.data_dir).map_err(io_error(&self.data_dir))?;
        temp.write_all(content.as_bytes())
            .map_err(io_error(temp.path()))?;
        temp.persist(&path)
            .map_err(|e| StoreError::Io {
                path: path.clone(),
                source: e.error,
            })?;
        Ok(())
    }

    fn absorb_legacy(&self, doc: &mut SyncedDocument) -> StoreResult<MigrationStatus> {
        let snapshot = LegacySnapshot::from_entries(&self.read_legacy_entries()?)?;
        for kind in ItemKind::all() {
            snapshot.check_builtin_ids(kind, &catalog::builtins(kind))?;
        }
        Ok(doc.absorb_legacy(&snapshot, Utc::now()))
    }
}

impl PreferenceStore for FileStore {
    async fn get(&self, kind: ItemKind) -> StoreResult<ItemLists> {
        let doc = self.load_synced()?;
        Ok(ItemLists {
            builtins: catalog::builtins(kind),
            customs: doc.customs(kind).to_vec(),
        })
    }

    async fn get_selection(&self, key: PreferenceKey) -> StoreResult<Option<String>> {
        Ok(self.load_synced()?.selection(key).map(str::to_string))
    }

    async fn set_selection(&self, key: PreferenceKey, id: &str) -> StoreResult<()> {
        self.update(|doc| {
            doc.set_selection(key, id);
            Ok(((), true))
        })?;
        tracing::debug!(%key, id, "selection saved");
        Ok(())
    }

    async fn migrate(&self) -> StoreResult<MigrationStatus> {
        self.update(|doc| Ok((self.absorb_legacy(doc)?, true)))
    }
}

impl CustomItemStore for FileStore {
    fn add_custom(&self, kind: ItemKind, name: &str) -> StoreResult<Item> {
        let item = self.update(|doc| {
            let item = Item::custom(&new_custom_id(kind), name);
            doc.customs_mut(kind).push(item.clone());
            Ok((item, true))
        })?;
        tracing::info!(%kind, id = %item.id, "custom item created");
        Ok(item)
    }

    fn remove_custom(&self, kind: ItemKind, id: &str) -> StoreResult<Item> {
        let removed = self.update(|doc| {
            let removed = doc
                .remove_custom(kind, id)
                .ok_or_else(|| StoreError::UnknownItem {
                    kind,
                    id: id.to_string(),
                })?;
            Ok((removed, true))
        })?;
        tracing::info!(%kind, id, "custom item deleted");
        Ok(removed)
    }
}
