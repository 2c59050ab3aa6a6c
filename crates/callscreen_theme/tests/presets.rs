use callscreen_theme::{
    builtin_themes, resolve_theme, BackgroundFill, BuiltinTheme, CallTheme, VideoFallback,
    DEFAULT_THEME_ID,
};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = BuiltinTheme::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec![
            "aurora",
            "cyberpunk",
            "dark-purple",
            "default",
            "fire",
            "galaxy",
            "ios-style",
            "luxury-gold",
            "midnight",
            "minimal",
            "nature",
            "neon",
            "ocean",
            "pure-white",
            "rose-gold",
            "sunset",
        ]
    );
}

#[test]
fn default_theme_leads_the_catalog() {
    assert_eq!(builtin_themes()[0].id, DEFAULT_THEME_ID);
    assert_eq!(builtin_themes()[0].name, "Classic");
}

#[test]
fn presets_are_not_custom_and_carry_localization_keys() {
    for theme in builtin_themes() {
        assert!(!theme.is_custom, "{}", theme.id);
        assert!(theme.created_at.is_none(), "{}", theme.id);
        let key = theme.name_key.as_deref().unwrap_or_default();
        assert!(key.starts_with("callThemes."), "{}: {key}", theme.id);
        assert_eq!(
            theme.description_key.as_deref(),
            Some(format!("{key}Desc").as_str())
        );
    }
}

#[test]
fn every_preset_resolves_without_fallback_to_black() {
    for theme in builtin_themes() {
        let resolved = resolve_theme(theme, &VideoFallback::new());
        if let BackgroundFill::Gradient { colors, .. } = &resolved.background.fill {
            assert!(colors.len() >= 2, "{}", theme.id);
        }
        assert_eq!(
            resolved.background.motion,
            theme.animations.background_animation.unwrap_or_default(),
            "{}",
            theme.id
        );
    }
}

#[test]
fn presets_survive_json() {
    for theme in builtin_themes() {
        let json = serde_json::to_string(theme).unwrap();
        let back: CallTheme = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, theme);
    }
}
