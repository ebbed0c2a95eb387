//! Shared test fixtures for settings panel and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use newt_settings::models::{Item, ItemKind, PreferenceKey};
use newt_settings::store::{FileStore, MemoryStore};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Built-in themes used by the end-to-end scenarios.
pub fn scenario_builtin_themes() -> Vec<Item> {
    vec![
        Item::builtin("theme-light", "Light"),
        Item::builtin("theme-dark", "Dark"),
    ]
}

/// Memory store with the given theme built-ins, customs, and stored selection.
pub fn theme_store(builtins: Vec<Item>, customs: Vec<Item>, selected: Option<&str>) -> MemoryStore {
    let store = MemoryStore::new()
        .with_builtins(ItemKind::Theme, builtins)
        .with_customs(ItemKind::Theme, customs);
    match selected {
        Some(id) => store.with_selection(PreferenceKey::SelectedTheme, id),
        None => store,
    }
}

/// Legacy map as the old local storage would hold it.
pub fn legacy_entries() -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    entries.insert("selectedTheme".to_string(), "customtheme-3".to_string());
    entries.insert("selectedKey".to_string(), "key-vim".to_string());
    entries.insert(
        "customThemes".to_string(),
        r##"[{"id":"customtheme-3","name":"Ocean","colors":{"bg":"#001f3f"}}]"##.to_string(),
    );
    entries.insert(
        "customKeys".to_string(),
        r#"[{"id":"customkey-9","name":"Left hand"}]"#.to_string(),
    );
    entries
}

/// Writes the legacy map into a data directory as `legacy.json`.
pub fn write_legacy_file(data_dir: &Path, entries: &BTreeMap<String, String>) {
    fs::create_dir_all(data_dir).expect("Failed to create data dir");
    let json = serde_json::to_string_pretty(entries).expect("Failed to serialize legacy map");
    fs::write(data_dir.join("legacy.json"), json).expect("Failed to write legacy file");
}

/// Temp directory holding a file store seeded with legacy data.
pub fn file_store_with_legacy() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_legacy_file(temp_dir.path(), &legacy_entries());
    let store = FileStore::open(temp_dir.path()).expect("Failed to open store");
    (temp_dir, store)
}
