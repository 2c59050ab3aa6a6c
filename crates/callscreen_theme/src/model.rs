//! Call theme model
//!
//! The persisted shape of a call-screen theme. Field names follow the JSON
//! written by earlier app versions (camelCase, background fields stored flat
//! next to a `type` tag) so existing custom themes keep loading.
//!
//! Deserialization is lenient: missing optional fields take defaults, unknown
//! enum strings map to a fallback variant, and unknown top-level fields are
//! kept in [`CallTheme::extra`] so they survive a save.

use callscreen_animation::{AnimationKind, BackgroundMotion};
use chrono::{DateTime, Utc};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::gradient::GradientDirection;

/// Theme identifier
pub type ThemeId = String;

pub const DEFAULT_VERSION: &str = "1.0.0";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

/// A complete call-screen theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTheme {
    pub id: ThemeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_key: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub avatar: AvatarStyle,
    #[serde(default)]
    pub answer_style: AnswerStyle,
    #[serde(default)]
    pub colors: Palette,
    #[serde(default, skip_serializing_if = "ThemeAnimations::is_empty")]
    pub animations: ThemeAnimations,

    #[serde(default = "default_true")]
    pub show_caller_info: bool,
    #[serde(default = "default_true")]
    pub show_country_flag: bool,
    #[serde(default = "default_true")]
    pub show_company: bool,
    #[serde(default = "default_true")]
    pub show_hd_badge: bool,

    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,

    /// Fields this version doesn't know about, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CallTheme {
    /// Bare theme with every section at its default
    pub fn new(id: impl Into<ThemeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_key: None,
            description: None,
            description_key: None,
            version: default_version(),
            author: None,
            background: Background::default(),
            avatar: AvatarStyle::default(),
            answer_style: AnswerStyle::default(),
            colors: Palette::default(),
            animations: ThemeAnimations::default(),
            show_caller_info: true,
            show_country_flag: true,
            show_company: true,
            show_hd_badge: true,
            is_premium: false,
            is_custom: false,
            created_at: None,
            updated_at: None,
            preview_image: None,
            extra: serde_json::Map::new(),
        }
    }
}

// ============================================================================
// Background
// ============================================================================

/// Background media plus an optional tint layered on top
///
/// Stored flat: the `type` tag, the kind's fields, then `overlay` and
/// `overlayOpacity`. A background whose kind can't be read is kept verbatim
/// as [`BackgroundKind::Unresolved`] so saving the theme doesn't lose it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Background {
    pub kind: BackgroundKind,
    pub overlay: Option<String>,
    pub overlay_opacity: Option<f32>,
}

const OVERLAY_KEY: &str = "overlay";
const OVERLAY_OPACITY_KEY: &str = "overlayOpacity";

impl Serialize for Background {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = match &self.kind {
            BackgroundKind::Unresolved(raw) => raw.clone(),
            kind => serde_json::to_value(kind).map_err(ser::Error::custom)?,
        };
        let mut fields = match kind {
            Value::Object(fields) => fields,
            // Not an object on disk either; nothing to merge the tint into
            other => return other.serialize(serializer),
        };
        if let Some(overlay) = &self.overlay {
            fields.insert(OVERLAY_KEY.into(), Value::from(overlay.as_str()));
        }
        if let Some(opacity) = self.overlay_opacity {
            fields.insert(OVERLAY_OPACITY_KEY.into(), Value::from(opacity));
        }
        fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = Value::deserialize(deserializer)?;
        let (overlay, overlay_opacity) = match raw.as_object_mut() {
            Some(fields) => (
                fields
                    .remove(OVERLAY_KEY)
                    .and_then(|v| v.as_str().map(str::to_owned)),
                fields
                    .remove(OVERLAY_OPACITY_KEY)
                    .and_then(|v| v.as_f64())
                    .map(|v| v as f32),
            ),
            None => (None, None),
        };

        let kind = match BackgroundKind::deserialize(&raw) {
            Ok(kind) => kind,
            Err(err) => {
                tracing::warn!("keeping unreadable background as-is: {}", err);
                BackgroundKind::Unresolved(raw)
            }
        };
        Ok(Self {
            kind,
            overlay,
            overlay_opacity,
        })
    }
}

impl Background {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Solid {
                color: Some(color.into()),
            },
            ..Default::default()
        }
    }

    pub fn gradient<S: Into<String>>(
        colors: impl IntoIterator<Item = S>,
        direction: GradientDirection,
    ) -> Self {
        Self {
            kind: BackgroundKind::Gradient {
                colors: colors.into_iter().map(Into::into).collect(),
                direction: Some(direction),
            },
            ..Default::default()
        }
    }

    pub fn image(source: MediaSource) -> Self {
        Self {
            kind: BackgroundKind::Image(source),
            ..Default::default()
        }
    }

    pub fn video(source: MediaSource) -> Self {
        Self {
            kind: BackgroundKind::Video(source),
            ..Default::default()
        }
    }

    /// Builder: tint the background
    pub fn with_overlay(mut self, color: impl Into<String>, opacity: f32) -> Self {
        self.overlay = Some(color.into());
        self.overlay_opacity = Some(opacity);
        self
    }
}

/// What the background is made of
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Gradient {
        #[serde(rename = "gradientColors", default)]
        colors: Vec<String>,
        #[serde(
            rename = "gradientDirection",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        direction: Option<GradientDirection>,
    },
    Image(MediaSource),
    Video(MediaSource),
    /// Stored fields that don't describe any known kind (missing or unknown
    /// `type`, wrong field types). Resolves to black.
    #[serde(skip)]
    Unresolved(Value),
}

impl Default for BackgroundKind {
    fn default() -> Self {
        BackgroundKind::Solid { color: None }
    }
}

/// Location of an image or video plus blur
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Bundled asset name; wins over `uri` when both are set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_asset: Option<String>,
    /// Blur radius, 0..=25
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

impl MediaSource {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    pub fn asset(name: impl Into<String>) -> Self {
        Self {
            local_asset: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = Some(blur);
        self
    }
}

// ============================================================================
// Avatar
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarShape {
    Rounded,
    Square,
    #[default]
    #[serde(other)]
    Circle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarSize {
    Small,
    Medium,
    Xlarge,
    #[default]
    #[serde(other)]
    Large,
}

impl AvatarSize {
    /// Diameter in logical px
    pub fn px(self) -> f32 {
        match self {
            Self::Small => 80.0,
            Self::Medium => 100.0,
            Self::Large => 120.0,
            Self::Xlarge => 150.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingStyle {
    Solid,
    Pulse,
    Glow,
    Rainbow,
    #[default]
    #[serde(other)]
    None,
}

impl RingStyle {
    /// Ring width used when the theme doesn't set one
    pub fn default_width(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Solid => 3.0,
            Self::Pulse | Self::Rainbow => 4.0,
            Self::Glow => 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarStyle {
    #[serde(default)]
    pub shape: AvatarShape,
    #[serde(default)]
    pub size: AvatarSize,
    #[serde(default)]
    pub ring_style: RingStyle,
    /// Falls back to the palette primary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_width: Option<f32>,
    #[serde(default = "default_true")]
    pub show_shadow: bool,
}

impl Default for AvatarStyle {
    fn default() -> Self {
        Self {
            shape: AvatarShape::Circle,
            size: AvatarSize::Large,
            ring_style: RingStyle::None,
            ring_color: None,
            ring_width: None,
            show_shadow: true,
        }
    }
}

// ============================================================================
// Answer style
// ============================================================================

/// Answer-surface layout family. `Classic` renders as `Android`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStyleType {
    Ios,
    Classic,
    Floating,
    Minimal,
    #[default]
    #[serde(other)]
    Android,
}

impl AnswerStyleType {
    pub fn id(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Classic => "classic",
            Self::Floating => "floating",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    Rounded,
    Pill,
    #[default]
    #[serde(other)]
    Circle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    Large,
    #[default]
    #[serde(other)]
    Medium,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStyle {
    #[serde(rename = "type", default)]
    pub kind: AnswerStyleType,
    #[serde(default)]
    pub animation: AnimationKind,
    #[serde(default)]
    pub button_shape: ButtonShape,
    #[serde(default)]
    pub button_size: ButtonSize,
    #[serde(default = "default_true")]
    pub show_labels: bool,
    #[serde(default = "default_true")]
    pub haptic_feedback: bool,
}

impl Default for AnswerStyle {
    fn default() -> Self {
        Self {
            kind: AnswerStyleType::Android,
            animation: AnimationKind::None,
            button_shape: ButtonShape::Circle,
            button_size: ButtonSize::Medium,
            show_labels: true,
            haptic_feedback: true,
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Semantic colors, stored as written (hex, `rgb()`, `rgba()`, `transparent`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    /// Answer button
    pub primary: String,
    /// Decline button
    pub danger: String,
    pub text: String,
    pub text_muted: String,
    pub surface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#4CAF50".into(),
            danger: "#F44336".into(),
            text: "#FFFFFF".into(),
            text_muted: "rgba(255,255,255,0.7)".into(),
            surface: "rgba(255,255,255,0.1)".into(),
            accent: None,
        }
    }
}

// ============================================================================
// Ambient animations
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvatarMotion {
    Pulse,
    Glow,
    Float,
    #[default]
    #[serde(other)]
    None,
}

/// How the call screen enters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomingTransition {
    SlideUp,
    Scale,
    Bounce,
    #[default]
    #[serde(other)]
    Fade,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeAnimations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_animation: Option<BackgroundMotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_animation: Option<AvatarMotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming_animation: Option<IncomingTransition>,
}

impl ThemeAnimations {
    pub fn is_empty(&self) -> bool {
        self.background_animation.is_none()
            && self.avatar_animation.is_none()
            && self.incoming_animation.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn minimal_json_fills_defaults() {
        let theme: CallTheme = serde_json::from_value(json!({
            "id": "t1",
            "name": "Bare"
        }))
        .unwrap();

        assert_eq!(theme.version, "1.0.0");
        assert_eq!(theme.background.kind, BackgroundKind::Solid { color: None });
        assert_eq!(theme.answer_style.kind, AnswerStyleType::Android);
        assert!(theme.answer_style.show_labels);
        assert!(theme.show_hd_badge);
        assert_eq!(theme.colors, Palette::default());
    }

    #[test]
    fn background_fields_are_flat() {
        let theme: CallTheme = serde_json::from_value(json!({
            "id": "t2",
            "name": "Grad",
            "background": {
                "type": "gradient",
                "gradientColors": ["#000", "#fff"],
                "gradientDirection": "diagonal-tr",
                "overlay": "#000000",
                "overlayOpacity": 0.3
            }
        }))
        .unwrap();

        assert_eq!(
            theme.background.kind,
            BackgroundKind::Gradient {
                colors: vec!["#000".into(), "#fff".into()],
                direction: Some(GradientDirection::DiagonalTr),
            }
        );
        assert_eq!(theme.background.overlay_opacity, Some(0.3));

        let out = serde_json::to_value(&theme).unwrap();
        assert_eq!(out["background"]["type"], "gradient");
        assert_eq!(out["background"]["gradientDirection"], "diagonal-tr");
        assert_eq!(out["background"]["overlay"], "#000000");
    }

    #[test]
    fn unknown_enum_strings_fall_back() {
        let theme: CallTheme = serde_json::from_value(json!({
            "id": "t3",
            "name": "Odd",
            "background": {
                "type": "gradient",
                "gradientColors": ["#000", "#fff"],
                "gradientDirection": "spiral"
            },
            "avatar": { "shape": "hexagon", "size": "huge", "ringStyle": "sparkle" },
            "answerStyle": { "type": "holo", "animation": "confetti", "buttonSize": "giant" }
        }))
        .unwrap();

        let BackgroundKind::Gradient { direction, .. } = theme.background.kind else {
            panic!("expected gradient");
        };
        assert_eq!(direction, Some(GradientDirection::TopBottom));
        assert_eq!(theme.avatar.shape, AvatarShape::Circle);
        assert_eq!(theme.avatar.size, AvatarSize::Large);
        assert_eq!(theme.avatar.ring_style, RingStyle::None);
        assert_eq!(theme.answer_style.kind, AnswerStyleType::Android);
        assert_eq!(theme.answer_style.animation, AnimationKind::None);
        assert_eq!(theme.answer_style.button_size, ButtonSize::Medium);
    }

    #[test]
    fn fallback_variants_still_parse_by_name() {
        let theme: CallTheme = serde_json::from_value(json!({
            "id": "t5",
            "name": "Explicit",
            "background": {
                "type": "gradient",
                "gradientColors": ["#000", "#fff"],
                "gradientDirection": "top-bottom"
            },
            "avatar": { "shape": "circle", "size": "large", "ringStyle": "none" },
            "answerStyle": { "type": "android", "animation": "none", "buttonSize": "medium" },
            "animations": { "backgroundAnimation": "none", "incomingAnimation": "fade" }
        }))
        .unwrap();

        let BackgroundKind::Gradient { direction, .. } = theme.background.kind else {
            panic!("expected gradient");
        };
        assert_eq!(direction, Some(GradientDirection::TopBottom));
        assert_eq!(theme.answer_style.kind, AnswerStyleType::Android);
        assert_eq!(theme.answer_style.animation, AnimationKind::None);
        assert_eq!(theme.animations.background_animation, Some(BackgroundMotion::None));
        assert_eq!(theme.animations.incoming_animation, Some(IncomingTransition::Fade));
        assert_eq!(serde_json::to_value(AnimationKind::None).unwrap(), "none");
        assert_eq!(serde_json::to_value(AvatarSize::Large).unwrap(), "large");
    }

    #[test]
    fn unreadable_background_is_kept_verbatim() {
        let raw = json!({ "color": "#112233", "overlay": "#000000", "overlayOpacity": 0.5 });
        let bg: Background = serde_json::from_value(raw.clone()).unwrap();

        assert!(matches!(bg.kind, BackgroundKind::Unresolved(_)));
        assert_eq!(bg.overlay.as_deref(), Some("#000000"));
        assert_eq!(bg.overlay_opacity, Some(0.5));
        assert_eq!(serde_json::to_value(&bg).unwrap(), raw);

        let odd: Background = serde_json::from_value(json!("sunset.png")).unwrap();
        assert_eq!(serde_json::to_value(&odd).unwrap(), json!("sunset.png"));
    }

    #[test]
    fn unknown_top_level_fields_survive() {
        let input = json!({
            "id": "t4",
            "name": "Future",
            "ringtone": { "uri": "file:///tone.ogg" },
            "schemaRevision": 7
        });
        let theme: CallTheme = serde_json::from_value(input).unwrap();
        assert_eq!(theme.extra.len(), 2);

        let out = serde_json::to_value(&theme).unwrap();
        assert_eq!(out["ringtone"]["uri"], "file:///tone.ogg");
        assert_eq!(out["schemaRevision"], 7);
    }

    #[test]
    fn timestamps_are_rfc3339() {
        let theme: CallTheme = serde_json::from_value(json!({
            "id": "custom-1",
            "name": "Mine",
            "isCustom": true,
            "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .unwrap();
        let created = theme.created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn media_background() {
        let bg: Background = serde_json::from_value(json!({
            "type": "video",
            "uri": "https://cdn/loop.mp4",
            "localAsset": "loop",
            "blur": 4
        }))
        .unwrap();
        assert_eq!(
            bg.kind,
            BackgroundKind::Video(MediaSource {
                uri: Some("https://cdn/loop.mp4".into()),
                local_asset: Some("loop".into()),
                blur: Some(4.0),
            })
        );
    }

    #[test]
    fn ring_widths() {
        assert_eq!(RingStyle::None.default_width(), 0.0);
        assert_eq!(RingStyle::Solid.default_width(), 3.0);
        assert_eq!(RingStyle::Glow.default_width(), 5.0);
        assert_eq!(AvatarSize::Xlarge.px(), 150.0);
    }
}
