//! Integration tests for the theme store over real storage backends
//!
//! These tests verify that:
//! - Persisted state survives a reload and degrades safely when corrupt
//! - Referential faults resolve to the default theme
//! - Storage failures never lose in-memory changes

use std::sync::Arc;

use callscreen_theme::{
    builtin_themes, is_builtin_id, load_custom_themes, resolve_background, BackgroundKind,
    CallTheme, FileStorage, MemoryStorage, ResolvedBackground, ThemeStorage, ThemeStore,
    ACTIVE_THEME_KEY, CUSTOM_THEMES_KEY, DEFAULT_THEME_ID,
};
use pretty_assertions::assert_eq;

fn memory() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

#[test]
fn test_dangling_active_id_resolves_to_default_but_is_persisted_verbatim() {
    let storage = memory();
    let store = ThemeStore::load(storage.clone());

    store.set_active_theme("nonexistent");

    assert_eq!(store.active_theme_id(), "nonexistent");
    assert_eq!(store.active_theme().id, DEFAULT_THEME_ID);
    assert_eq!(storage.peek(ACTIVE_THEME_KEY).as_deref(), Some("nonexistent"));

    // A reload resolves the dangling id, the stored value stays as written
    let reloaded = ThemeStore::load(storage.clone());
    assert_eq!(reloaded.active_theme_id(), DEFAULT_THEME_ID);
    assert_eq!(storage.peek(ACTIVE_THEME_KEY).as_deref(), Some("nonexistent"));
}

#[test]
fn test_malformed_custom_storage_loads_empty() {
    for payload in ["{not json", "{\"id\":\"x\"}", "42", "null"] {
        let storage = MemoryStorage::new().with_entry(CUSTOM_THEMES_KEY, payload);
        assert!(load_custom_themes(&storage).is_empty(), "{payload}");
    }
}

#[test]
fn test_malformed_elements_are_skipped_individually() {
    let payload = serde_json::json!([
        { "id": "custom-a", "name": "Kept" },
        { "name": "no id" },
        "just a string",
        { "id": "neon", "name": "Shadows a built-in" },
        { "id": "custom-a", "name": "Duplicate" },
        { "id": "custom-b", "name": "Also kept", "answerStyle": { "type": "ios" } }
    ]);
    let storage = MemoryStorage::new().with_entry(CUSTOM_THEMES_KEY, payload.to_string());

    let ids: Vec<String> = load_custom_themes(&storage)
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["custom-a".to_string(), "custom-b".to_string()]);
}

#[test]
fn test_unreadable_storage_loads_defaults() {
    let storage = Arc::new(MemoryStorage::new().with_entry(ACTIVE_THEME_KEY, "neon"));
    storage.fail_reads(true);

    let store = ThemeStore::load(storage);
    assert_eq!(store.active_theme_id(), DEFAULT_THEME_ID);
    assert!(store.custom_themes().is_empty());
}

#[test]
fn test_delete_active_custom_theme_resets_to_default() {
    let storage = memory();
    let store = ThemeStore::load(storage.clone());

    let mine = store.duplicate_theme("ocean");
    store.set_active_theme(&mine.id);
    assert_eq!(store.active_theme().id, mine.id);

    assert!(store.delete_custom_theme(&mine.id));
    assert_eq!(store.active_theme_id(), DEFAULT_THEME_ID);
    assert_eq!(storage.peek(ACTIVE_THEME_KEY).as_deref(), Some(DEFAULT_THEME_ID));
    assert_eq!(storage.peek(CUSTOM_THEMES_KEY).as_deref(), Some("[]"));
}

#[test]
fn test_delete_builtin_is_noop() {
    let store = ThemeStore::in_memory();
    store.set_active_theme("galaxy");
    assert!(!store.delete_custom_theme("galaxy"));
    assert_eq!(store.active_theme_id(), "galaxy");
    assert_eq!(store.all_themes().len(), builtin_themes().len());
}

#[test]
fn test_duplicate_ids_are_unique_across_catalog() {
    let store = ThemeStore::in_memory();
    let first = store.duplicate_theme("sunset");
    let second = store.duplicate_theme("sunset");
    let of_copy = store.duplicate_theme(&first.id);

    for copy in [&first, &second, &of_copy] {
        assert!(copy.id.starts_with("custom-"));
        assert!(!is_builtin_id(&copy.id));
        let matches = store.all_themes().iter().filter(|t| t.id == copy.id).count();
        assert_eq!(matches, 1);
    }

    assert_eq!(first.name, "Sunset (Copy)");
    assert_eq!(of_copy.name, "Sunset (Copy) (Copy)");
    assert_eq!(first.description.as_deref(), Some("Custom theme"));
    assert!(first.name_key.is_none());
    assert!(first.description_key.is_none());
    assert!(first.is_custom);
    assert_eq!(first.background, store.theme("sunset").unwrap().background);
}

#[test]
fn test_duplicate_unknown_copies_default() {
    let store = ThemeStore::in_memory();
    let copy = store.duplicate_theme("does-not-exist");
    assert_eq!(copy.name, "Classic (Copy)");
    assert_eq!(copy.colors, store.theme(DEFAULT_THEME_ID).unwrap().colors);
}

#[test]
fn test_save_reassigns_colliding_ids() {
    let store = ThemeStore::in_memory();

    let saved = store.save_custom_theme(CallTheme::new("neon", "Impostor"));
    assert_ne!(saved.id, "neon");
    assert_eq!(store.theme("neon").unwrap().name, "Neon Glow");

    let again = store.save_custom_theme(saved.clone());
    assert_ne!(again.id, saved.id);
    assert_eq!(store.custom_themes().len(), 2);
}

#[test]
fn test_update_unknown_is_noop() {
    let storage = memory();
    let store = ThemeStore::load(storage.clone());
    assert!(!store.update_custom_theme(CallTheme::new("custom-missing", "Ghost")));
    assert!(storage.peek(CUSTOM_THEMES_KEY).is_none());
}

#[test]
fn test_create_custom_theme_is_unsaved() {
    let store = ThemeStore::in_memory();
    let draft = store.create_custom_theme(store.theme("luxury-gold").as_ref());

    assert_eq!(draft.name, "My Theme");
    assert!(draft.created_at.is_some());
    assert_eq!(draft.created_at, draft.updated_at);
    assert!(store.theme(&draft.id).is_none());
}

#[test]
fn test_write_failures_keep_memory_state() {
    let storage = memory();
    let store = ThemeStore::load(storage.clone());
    storage.fail_writes(true);

    store.set_active_theme("fire");
    let mine = store.duplicate_theme("fire");

    assert_eq!(store.active_theme_id(), "fire");
    assert!(store.theme(&mine.id).is_some());
    assert!(storage.peek(ACTIVE_THEME_KEY).is_none());
    assert!(storage.peek(CUSTOM_THEMES_KEY).is_none());

    // The next successful write carries the full set
    storage.fail_writes(false);
    let second = store.duplicate_theme("aurora");
    let persisted: Vec<CallTheme> =
        serde_json::from_str(&storage.peek(CUSTOM_THEMES_KEY).unwrap()).unwrap();
    let ids: Vec<&str> = persisted.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![mine.id.as_str(), second.id.as_str()]);
}

#[test]
fn test_file_storage_roundtrip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let mine = {
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let store = ThemeStore::load(storage);
        let mine = store.duplicate_theme("midnight");
        store.set_active_theme(&mine.id);
        mine
    };

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    assert_eq!(
        storage.get(ACTIVE_THEME_KEY).unwrap().as_deref(),
        Some(mine.id.as_str())
    );

    let store = ThemeStore::load(storage);
    assert_eq!(store.active_theme_id(), mine.id);
    assert_eq!(store.active_theme(), mine);
}

#[test]
fn test_partial_backgrounds_load_and_resolve_to_black() {
    let payload = serde_json::json!([
        { "id": "custom-a", "name": "Untyped", "background": { "color": "#112233" } },
        {
            "id": "custom-b",
            "name": "From the future",
            "background": { "type": "particles", "density": 3, "overlay": "#000000" }
        }
    ]);
    let storage =
        Arc::new(MemoryStorage::new().with_entry(CUSTOM_THEMES_KEY, payload.to_string()));
    let store = ThemeStore::load(storage.clone());

    let custom = store.custom_themes();
    assert_eq!(custom.len(), 2);
    for theme in &custom {
        assert!(matches!(theme.background.kind, BackgroundKind::Unresolved(_)));
        assert_eq!(resolve_background(&theme.background), ResolvedBackground::black());
    }
    assert_eq!(custom[1].background.overlay.as_deref(), Some("#000000"));

    // A later write carries the stored fields back out untouched
    store.duplicate_theme("neon");
    let persisted: serde_json::Value =
        serde_json::from_str(&storage.peek(CUSTOM_THEMES_KEY).unwrap()).unwrap();
    assert_eq!(persisted[0]["background"], serde_json::json!({ "color": "#112233" }));
    assert_eq!(persisted[1]["background"]["type"], "particles");
    assert_eq!(persisted[1]["background"]["density"], 3);
    assert_eq!(persisted[1]["background"]["overlay"], "#000000");
}

#[test]
fn test_reselecting_active_retries_failed_write() {
    let storage = memory();
    let store = ThemeStore::load(storage.clone());

    storage.fail_writes(true);
    store.set_active_theme("neon");
    assert!(storage.peek(ACTIVE_THEME_KEY).is_none());

    storage.fail_writes(false);
    store.set_active_theme("neon");
    assert_eq!(storage.peek(ACTIVE_THEME_KEY).as_deref(), Some("neon"));
}

#[test]
fn test_selecting_default_overwrites_dangling_stored_id() {
    let storage = Arc::new(MemoryStorage::new().with_entry(ACTIVE_THEME_KEY, "custom-gone"));
    let store = ThemeStore::load(storage.clone());
    assert_eq!(store.active_theme_id(), DEFAULT_THEME_ID);

    store.set_active_theme(DEFAULT_THEME_ID);
    assert_eq!(storage.peek(ACTIVE_THEME_KEY).as_deref(), Some(DEFAULT_THEME_ID));
}

#[test]
fn test_concurrent_writers_persist_latest_set() {
    let storage = memory();
    let store = ThemeStore::load(storage.clone());

    std::thread::scope(|scope| {
        for source in ["neon", "ocean", "fire", "aurora"] {
            let store = &store;
            scope.spawn(move || {
                for _ in 0..25 {
                    store.duplicate_theme(source);
                }
            });
        }
    });

    let persisted: Vec<CallTheme> =
        serde_json::from_str(&storage.peek(CUSTOM_THEMES_KEY).unwrap()).unwrap();
    let persisted: Vec<String> = persisted.into_iter().map(|t| t.id).collect();
    let in_memory: Vec<String> = store.custom_themes().into_iter().map(|t| t.id).collect();
    assert_eq!(in_memory.len(), 100);
    assert_eq!(persisted, in_memory);
}
