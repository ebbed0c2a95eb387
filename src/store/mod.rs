//! Preference store contract and bundled implementations.
//!
//! The settings core only depends on [`PreferenceStore`]. Two engines are
//! provided: [`MemoryStore`] for embedding and tests, and [`FileStore`] which
//! keeps the legacy local-storage map and the synced document on disk.

pub mod document;
pub mod file;
pub mod legacy;
pub mod memory;

use std::future::Future;

use crate::error::StoreResult;
use crate::models::{Item, ItemKind, ItemLists, MigrationStatus, PreferenceKey};

pub use document::SyncedDocument;
pub use file::FileStore;
pub use legacy::LegacySnapshot;
pub use memory::MemoryStore;

/// Read/write/migrate contract of a preference store.
///
/// All operations may suspend (a synced store can be network backed). A
/// store must provide read-your-writes consistency for selections and must
/// serialize concurrent writes to the same key (last write wins).
pub trait PreferenceStore {
    /// Returns the built-in and custom items of a kind, in display order.
    fn get(&self, kind: ItemKind) -> impl Future<Output = StoreResult<ItemLists>>;

    /// Returns the stored selection for a key, if one was ever written.
    fn get_selection(&self, key: PreferenceKey) -> impl Future<Output = StoreResult<Option<String>>>;

    /// Stores a selection.
    fn set_selection(&self, key: PreferenceKey, id: &str) -> impl Future<Output = StoreResult<()>>;

    /// Copies legacy preference data into this store.
    ///
    /// Must be idempotent and must never modify the legacy data.
    fn migrate(&self) -> impl Future<Output = StoreResult<MigrationStatus>>;
}

/// Custom item mutations performed on behalf of the external builders.
///
/// The settings core never calls these; the builder and the confirmation
/// dialog do, and then report completion to the panel so it refreshes.
pub trait CustomItemStore {
    /// Creates a custom item with a generated id.
    fn add_custom(&self, kind: ItemKind, name: &str) -> StoreResult<Item>;

    /// Deletes a custom item. Built-in items cannot be deleted.
    fn remove_custom(&self, kind: ItemKind, id: &str) -> StoreResult<Item>;
}

/// Builds an id for a new custom item of `kind`.
pub(crate) fn new_custom_id(kind: ItemKind) -> String {
    format!("{}-{}", kind.custom_id_prefix(), uuid::Uuid::new_v4().simple())
}
