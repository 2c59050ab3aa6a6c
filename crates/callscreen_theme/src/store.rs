//! Observable theme store
//!
//! Holds the active theme id and the user's custom themes on top of the
//! built-in catalog. Mutations apply in memory first and persist the whole
//! custom set best-effort before the write lock is released, so concurrent
//! writers reach storage in the same order they changed memory. A failed
//! write is logged and the in-memory state stands. Subscribers are notified
//! last, outside every lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use rustc_hash::FxHashMap;

use crate::model::{CallTheme, ThemeId};
use crate::presets::{builtin_theme, builtin_themes, default_theme, is_builtin_id, DEFAULT_THEME_ID};
use crate::storage::{MemoryStorage, ThemeStorage, ACTIVE_THEME_KEY, CUSTOM_THEMES_KEY};

const CUSTOM_NAME: &str = "My Theme";
const CUSTOM_DESCRIPTION: &str = "Custom theme";

/// Handle returned by [`ThemeStore::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What changed in the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreChange {
    /// The active theme id was set
    ActiveChanged(ThemeId),
    /// A custom theme was added, replaced or removed
    CustomSetChanged,
}

type Subscriber = Arc<dyn Fn(&StoreChange) + Send + Sync>;

#[derive(Debug)]
struct StoreState {
    active_id: ThemeId,
    custom: Vec<CallTheme>,
}

/// Built-in plus custom themes, with the active selection
pub struct ThemeStore {
    storage: Arc<dyn ThemeStorage>,
    state: RwLock<StoreState>,
    subscribers: RwLock<FxHashMap<SubscriptionId, Subscriber>>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Load persisted state from `storage`
    ///
    /// Never fails. Unreadable or corrupt storage yields no custom themes and
    /// the default active theme.
    pub fn load(storage: Arc<dyn ThemeStorage>) -> Self {
        let custom = load_custom_themes(storage.as_ref());
        let active_id = load_active_theme_id(storage.as_ref(), &custom);
        tracing::debug!(
            "ThemeStore::load - active `{}`, {} custom themes",
            active_id,
            custom.len()
        );

        Self {
            storage,
            state: RwLock::new(StoreState { active_id, custom }),
            subscribers: RwLock::new(FxHashMap::default()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Store over a fresh [`MemoryStorage`]
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStorage::new()))
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Active theme ==========

    /// Set and persist the active id
    ///
    /// The id is stored as given. If it names no theme, [`Self::active_theme`]
    /// resolves to the default while the stored id stays as written.
    /// Re-selecting the current id writes it again but notifies nobody.
    pub fn set_active_theme(&self, id: &str) {
        let changed = {
            let mut state = self.write();
            let changed = state.active_id != id;
            if changed {
                tracing::debug!(
                    "ThemeStore::set_active_theme - `{}` -> `{}`",
                    state.active_id,
                    id
                );
                state.active_id = id.to_string();
            }
            self.persist_active(id);
            changed
        };
        if changed {
            self.notify(&StoreChange::ActiveChanged(id.to_string()));
        }
    }

    pub fn active_theme_id(&self) -> ThemeId {
        self.read().active_id.clone()
    }

    /// The active theme, or the default when the active id is dangling
    pub fn active_theme(&self) -> CallTheme {
        let state = self.read();
        lookup(&state.custom, &state.active_id)
            .cloned()
            .unwrap_or_else(|| default_theme().clone())
    }

    // ========== Lookup ==========

    pub fn theme(&self, id: &str) -> Option<CallTheme> {
        lookup(&self.read().custom, id).cloned()
    }

    /// Built-ins first, then custom themes in insertion order
    pub fn all_themes(&self) -> Vec<CallTheme> {
        let state = self.read();
        builtin_themes()
            .iter()
            .chain(state.custom.iter())
            .cloned()
            .collect()
    }

    pub fn builtin_themes(&self) -> &'static [CallTheme] {
        builtin_themes()
    }

    pub fn custom_themes(&self) -> Vec<CallTheme> {
        self.read().custom.clone()
    }

    // ========== Custom themes ==========

    /// Add a custom theme and persist the set
    ///
    /// The theme is marked custom and timestamped. An id already taken by a
    /// built-in or another custom theme is replaced with a fresh one; the
    /// returned theme carries the id actually stored.
    pub fn save_custom_theme(&self, mut theme: CallTheme) -> CallTheme {
        let now = Utc::now();
        theme.is_custom = true;
        theme.created_at.get_or_insert(now);
        theme.updated_at = Some(now);

        {
            let mut state = self.write();
            if theme.id.is_empty() || lookup(&state.custom, &theme.id).is_some() {
                let fresh = generate_id(&state.custom);
                tracing::debug!("theme id `{}` taken, saving as `{}`", theme.id, fresh);
                theme.id = fresh;
            }
            state.custom.push(theme.clone());
            self.persist_custom(&state.custom);
        }
        tracing::debug!("ThemeStore::save_custom_theme - `{}`", theme.id);

        self.notify(&StoreChange::CustomSetChanged);
        theme
    }

    /// Replace the custom theme with the same id
    ///
    /// Returns `false` and changes nothing if no custom theme has that id.
    pub fn update_custom_theme(&self, mut theme: CallTheme) -> bool {
        theme.updated_at = Some(Utc::now());
        theme.is_custom = true;

        {
            let mut state = self.write();
            let Some(slot) = state.custom.iter_mut().find(|t| t.id == theme.id) else {
                tracing::debug!("update of unknown custom theme `{}` ignored", theme.id);
                return false;
            };
            if theme.created_at.is_none() {
                theme.created_at = slot.created_at;
            }
            *slot = theme;
            self.persist_custom(&state.custom);
        }

        self.notify(&StoreChange::CustomSetChanged);
        true
    }

    /// Remove a custom theme
    ///
    /// Deleting the active theme resets the active id to the default in the
    /// same critical section. Built-in and unknown ids are ignored. Returns
    /// whether anything was removed.
    pub fn delete_custom_theme(&self, id: &str) -> bool {
        let reset_active = {
            let mut state = self.write();
            let before = state.custom.len();
            state.custom.retain(|t| t.id != id);
            if state.custom.len() == before {
                return false;
            }
            let reset_active = state.active_id == id;
            if reset_active {
                state.active_id = DEFAULT_THEME_ID.to_string();
            }
            self.persist_custom(&state.custom);
            if reset_active {
                self.persist_active(DEFAULT_THEME_ID);
            }
            reset_active
        };
        tracing::debug!(
            "ThemeStore::delete_custom_theme - `{}` (was active: {})",
            id,
            reset_active
        );

        self.notify(&StoreChange::CustomSetChanged);
        if reset_active {
            self.notify(&StoreChange::ActiveChanged(DEFAULT_THEME_ID.to_string()));
        }
        true
    }

    /// Copy a theme into a new custom theme named "<source> (Copy)"
    ///
    /// An unknown id copies the default theme.
    pub fn duplicate_theme(&self, id: &str) -> CallTheme {
        let source = self.theme(id).unwrap_or_else(|| {
            tracing::debug!("duplicate of unknown theme `{}`, copying default", id);
            default_theme().clone()
        });
        let mut copy = self.create_custom_theme(Some(&source));
        copy.name = format!("{} (Copy)", source.name);
        self.save_custom_theme(copy)
    }

    /// An unsaved custom theme based on `base`, or on the default theme
    pub fn create_custom_theme(&self, base: Option<&CallTheme>) -> CallTheme {
        let mut theme = base.cloned().unwrap_or_else(|| default_theme().clone());
        let now = Utc::now();
        theme.id = generate_id(&self.read().custom);
        theme.name = CUSTOM_NAME.to_string();
        theme.name_key = None;
        theme.description = Some(CUSTOM_DESCRIPTION.to_string());
        theme.description_key = None;
        theme.is_custom = true;
        theme.created_at = Some(now);
        theme.updated_at = Some(now);
        theme
    }

    // ========== Observers ==========

    /// Call `callback` after every mutation
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(callback));
        id
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    fn notify(&self, change: &StoreChange) {
        // Callbacks may re-enter the store, so call them without holding locks
        let callbacks: Vec<Subscriber> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for callback in callbacks {
            callback(change);
        }
    }

    // ========== Persistence ==========

    fn persist_active(&self, id: &str) {
        if let Err(err) = self.storage.set(ACTIVE_THEME_KEY, id) {
            tracing::warn!("failed to persist active theme `{}`: {}", id, err);
        }
    }

    fn persist_custom(&self, themes: &[CallTheme]) {
        let result = serde_json::to_string(themes)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(CUSTOM_THEMES_KEY, &json));
        if let Err(err) = result {
            tracing::warn!("failed to persist {} custom themes: {}", themes.len(), err);
        }
    }
}

/// Persisted active id, resolved against the built-ins and `custom`
///
/// Missing, unreadable, or dangling ids yield [`DEFAULT_THEME_ID`].
pub fn load_active_theme_id(storage: &dyn ThemeStorage, custom: &[CallTheme]) -> ThemeId {
    match storage.get(ACTIVE_THEME_KEY) {
        Ok(Some(id)) if lookup(custom, &id).is_some() => id,
        Ok(Some(id)) => {
            tracing::debug!("stored active theme `{}` not found, using default", id);
            DEFAULT_THEME_ID.to_string()
        }
        Ok(None) => DEFAULT_THEME_ID.to_string(),
        Err(err) => {
            tracing::warn!("failed to read active theme: {}", err);
            DEFAULT_THEME_ID.to_string()
        }
    }
}

/// Persisted custom themes
///
/// A missing, unreadable, or non-array payload yields an empty list. Elements
/// that fail to parse are skipped, as are elements that reuse a built-in id.
pub fn load_custom_themes(storage: &dyn ThemeStorage) -> Vec<CallTheme> {
    let raw = match storage.get(CUSTOM_THEMES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("failed to read custom themes: {}", err);
            return Vec::new();
        }
    };

    let items = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("custom themes payload is not an array, ignoring it");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!("custom themes payload is not valid JSON: {}", err);
            return Vec::new();
        }
    };

    let mut themes: Vec<CallTheme> = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<CallTheme>(item) {
            Ok(theme) if is_builtin_id(&theme.id) => {
                tracing::warn!("custom theme reuses built-in id `{}`, skipping", theme.id);
            }
            Ok(theme) if themes.iter().any(|t| t.id == theme.id) => {
                tracing::warn!("duplicate custom theme id `{}`, skipping", theme.id);
            }
            Ok(theme) => themes.push(theme),
            Err(err) => tracing::warn!("skipping malformed custom theme #{}: {}", index, err),
        }
    }
    themes
}

fn lookup<'a>(custom: &'a [CallTheme], id: &str) -> Option<&'a CallTheme> {
    builtin_theme(id).or_else(|| custom.iter().find(|t| t.id == id))
}

/// `custom-<uuid>`, unique against the catalog and `custom`
fn generate_id(custom: &[CallTheme]) -> ThemeId {
    loop {
        let id = format!("custom-{}", uuid::Uuid::new_v4());
        if lookup(custom, &id).is_none() {
            return id;
        }
    }
}
