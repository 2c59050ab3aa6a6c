//! Call Screen Themes
//!
//! The theme model for the incoming-call screen, the built-in catalog, and a
//! persisted store for user-created variants.
//!
//! # Overview
//!
//! - **Model**: [`CallTheme`] and its sections (background, avatar, answer
//!   style, palette, ambient animations), serialized as camelCase JSON
//! - **Catalog**: sixteen built-in themes, see [`BuiltinTheme`]
//! - **Resolution**: [`resolve_theme`] turns a stored theme into concrete
//!   colors and fills, falling back to solid black and the default palette
//! - **Store**: [`ThemeStore`] tracks the active theme and custom themes over
//!   any [`ThemeStorage`] backend
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use callscreen_theme::{resolve_theme, MemoryStorage, ThemeStore, VideoFallback};
//!
//! let store = ThemeStore::load(Arc::new(MemoryStorage::new()));
//! store.set_active_theme("neon");
//!
//! let resolved = resolve_theme(&store.active_theme(), &VideoFallback::new());
//! assert_eq!(resolved.id, "neon");
//!
//! let copy = store.duplicate_theme("neon");
//! assert_eq!(copy.name, "Neon Glow (Copy)");
//! ```
//!
//! # Failure model
//!
//! Nothing here fails the call screen. Storage errors are logged and the
//! in-memory state carries on; malformed theme data resolves to fallbacks at
//! the point of use; a dangling active id resolves to the default theme.

pub mod error;
pub mod gradient;
pub mod model;
pub mod presets;
pub mod resolve;
pub mod storage;
pub mod store;

pub use error::{Result, StorageError};
pub use gradient::{gradient_vectors, GradientDirection};
pub use model::{
    AnswerStyle, AnswerStyleType, AvatarMotion, AvatarShape, AvatarSize, AvatarStyle, Background,
    BackgroundKind, ButtonShape, ButtonSize, CallTheme, IncomingTransition, MediaSource, Palette,
    RingStyle, ThemeAnimations, ThemeId,
};
pub use presets::{
    builtin_theme, builtin_themes, default_theme, is_builtin_id, BuiltinTheme, DEFAULT_THEME_ID,
};
pub use resolve::{
    resolve_avatar, resolve_background, resolve_palette, resolve_theme, BackgroundFill,
    DisplayFlags, MediaRef, Overlay, ResolvedAvatar, ResolvedBackground, ResolvedPalette,
    ResolvedTheme, VideoFallback,
};
pub use storage::{FileStorage, MemoryStorage, ThemeStorage, ACTIVE_THEME_KEY, CUSTOM_THEMES_KEY};
pub use store::{load_active_theme_id, load_custom_themes, StoreChange, SubscriptionId, ThemeStore};
