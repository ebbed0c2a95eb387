//! File-backed store behaviour across instances and with the panel.

use std::fs;
use std::sync::Arc;

use newt_settings::affordance::Affordances;
use newt_settings::models::{ItemKind, MigrationStatus, PreferenceKey, CURRENT_MIGRATION_VERSION};
use newt_settings::panel::SettingsPanel;
use newt_settings::store::{CustomItemStore, FileStore, PreferenceStore};
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[tokio::test]
async fn test_two_stores_on_one_directory_share_writes() {
    let temp_dir = TempDir::new().unwrap();
    let first = FileStore::open(temp_dir.path()).unwrap();
    let second = FileStore::open(temp_dir.path()).unwrap();

    let item = first.add_custom(ItemKind::Theme, "Sunset").unwrap();
    second
        .set_selection(PreferenceKey::SelectedTheme, &item.id)
        .await
        .unwrap();

    assert_eq!(
        first
            .get_selection(PreferenceKey::SelectedTheme)
            .await
            .unwrap()
            .as_deref(),
        Some(item.id.as_str())
    );
    assert_eq!(second.get(ItemKind::Theme).await.unwrap().customs, vec![item]);
}

#[tokio::test]
async fn test_first_run_migration_record_survives_reopen() {
    let (temp_dir, store) = file_store_with_legacy();
    assert!(matches!(
        store.ensure_migrated().unwrap(),
        MigrationStatus::Migrated { .. }
    ));

    let reopened = FileStore::open(temp_dir.path()).unwrap();
    assert_eq!(
        reopened.ensure_migrated().unwrap(),
        MigrationStatus::AlreadyCurrent
    );
    let record = reopened.load_synced().unwrap().migration;
    assert_eq!(record.version, CURRENT_MIGRATION_VERSION);
    assert!(record.migrated_at.is_some());
}

#[tokio::test]
async fn test_panel_over_migrated_file_store() {
    let (_temp_dir, store) = file_store_with_legacy();
    store.ensure_migrated().unwrap();
    let store = Arc::new(store);

    let mut panel = SettingsPanel::open(Arc::clone(&store)).await.unwrap();
    assert_eq!(panel.selected(ItemKind::Theme), Some("customtheme-3"));
    assert_eq!(panel.affordances(ItemKind::Theme), Affordances::ALL);

    store.remove_custom(ItemKind::Theme, "customtheme-3").unwrap();
    panel.editor_completed(ItemKind::Theme).await.unwrap();

    assert_eq!(panel.selected(ItemKind::Theme), Some("theme-light"));
    let reopened = FileStore::open(store.data_dir()).unwrap();
    assert_eq!(
        reopened.load_synced().unwrap().selection(PreferenceKey::SelectedTheme),
        Some("theme-light")
    );
}

#[tokio::test]
async fn test_unreadable_synced_document_fails_mount() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(temp_dir.path()).unwrap();
    fs::write(store.synced_path(), "{ truncated").unwrap();

    assert!(SettingsPanel::open(Arc::new(store)).await.is_err());
}

#[test]
fn test_concurrent_instances_do_not_lose_writes() {
    let temp_dir = TempDir::new().unwrap();
    let rounds = 25;

    let handles: Vec<_> = [ItemKind::Theme, ItemKind::Shortcuts]
        .into_iter()
        .map(|kind| {
            let dir = temp_dir.path().to_path_buf();
            std::thread::spawn(move || {
                let store = FileStore::open(dir).unwrap();
                for i in 0..rounds {
                    store.add_custom(kind, &format!("Item {i}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let doc = FileStore::open(temp_dir.path()).unwrap().load_synced().unwrap();
    assert_eq!(doc.custom_themes.len(), rounds);
    assert_eq!(doc.custom_keys.len(), rounds);
}

#[test]
fn test_selection_writes_to_different_keys_both_survive() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();

    for round in 0..20 {
        let theme_id = format!("theme-{round}");
        let key_id = format!("key-{round}");
        let theme_dir = dir.clone();
        let key_dir = dir.clone();

        let theme_writer = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let store = FileStore::open(theme_dir).unwrap();
            runtime
                .block_on(store.set_selection(PreferenceKey::SelectedTheme, &theme_id))
                .unwrap();
        });
        let key_writer = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let store = FileStore::open(key_dir).unwrap();
            runtime
                .block_on(store.set_selection(PreferenceKey::SelectedKey, &key_id))
                .unwrap();
        });
        theme_writer.join().unwrap();
        key_writer.join().unwrap();

        let doc = FileStore::open(&dir).unwrap().load_synced().unwrap();
        assert_eq!(
            doc.selection(PreferenceKey::SelectedTheme),
            Some(format!("theme-{round}").as_str())
        );
        assert_eq!(
            doc.selection(PreferenceKey::SelectedKey),
            Some(format!("key-{round}").as_str())
        );
    }
}
