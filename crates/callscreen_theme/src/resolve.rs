//! Theme resolution
//!
//! Turns a stored [`CallTheme`] into concrete render values. Resolution never
//! fails: anything missing or unparseable falls back (black background,
//! default palette entry) and the call screen still draws.

use callscreen_animation::BackgroundMotion;
use callscreen_core::{Color, Point};
use serde::Serialize;

use crate::gradient::gradient_vectors;
use crate::model::*;

/// Largest blur radius a background may request
pub const MAX_BLUR: f32 = 25.0;

/// Image or video location after precedence is applied
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MediaRef {
    /// Bundled asset
    Asset(String),
    Uri(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackgroundFill {
    Solid {
        color: Color,
    },
    Gradient {
        colors: Vec<Color>,
        start: Point,
        end: Point,
    },
    Image {
        source: MediaRef,
        blur: f32,
    },
    Video {
        source: MediaRef,
        blur: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Overlay {
    pub color: Color,
    pub opacity: f32,
}

/// Exactly one fill, optionally tinted
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedBackground {
    pub fill: BackgroundFill,
    pub overlay: Option<Overlay>,
    pub motion: BackgroundMotion,
}

impl ResolvedBackground {
    /// Solid black, nothing on top
    pub fn black() -> Self {
        Self {
            fill: BackgroundFill::Solid {
                color: Color::BLACK,
            },
            overlay: None,
            motion: BackgroundMotion::None,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self.fill, BackgroundFill::Video { .. })
    }
}

/// Resolve a background description
pub fn resolve_background(background: &Background) -> ResolvedBackground {
    let fill = match &background.kind {
        BackgroundKind::Solid { color } => {
            let color = color
                .as_deref()
                .and_then(|c| parse_or_warn(c, "background color"))
                .unwrap_or(Color::BLACK);
            BackgroundFill::Solid { color }
        }
        BackgroundKind::Gradient { colors, direction } => {
            let stops: Vec<Color> = colors
                .iter()
                .filter_map(|c| parse_or_warn(c, "gradient stop"))
                .collect();
            if stops.len() < 2 {
                tracing::debug!(
                    "gradient has {} usable stops, falling back to black",
                    stops.len()
                );
                return ResolvedBackground::black();
            }
            let (start, end) = gradient_vectors(*direction);
            BackgroundFill::Gradient {
                colors: stops,
                start,
                end,
            }
        }
        BackgroundKind::Image(media) => match resolve_media(media) {
            Some((source, blur)) => BackgroundFill::Image { source, blur },
            None => return ResolvedBackground::black(),
        },
        BackgroundKind::Video(media) => match resolve_media(media) {
            Some((source, blur)) => BackgroundFill::Video { source, blur },
            None => return ResolvedBackground::black(),
        },
        BackgroundKind::Unresolved(_) => {
            tracing::debug!("background kind unreadable, falling back to black");
            return ResolvedBackground::black();
        }
    };

    ResolvedBackground {
        fill,
        overlay: resolve_overlay(background),
        motion: BackgroundMotion::None,
    }
}

fn resolve_media(media: &MediaSource) -> Option<(MediaRef, f32)> {
    let source = match (&media.local_asset, &media.uri) {
        (Some(asset), _) if !asset.is_empty() => MediaRef::Asset(asset.clone()),
        (_, Some(uri)) if !uri.is_empty() => MediaRef::Uri(uri.clone()),
        _ => {
            tracing::debug!("media background has no source, falling back to black");
            return None;
        }
    };
    let blur = media.blur.unwrap_or(0.0);
    let blur = if blur.is_nan() {
        0.0
    } else {
        blur.clamp(0.0, MAX_BLUR)
    };
    Some((source, blur))
}

fn resolve_overlay(background: &Background) -> Option<Overlay> {
    let color = background.overlay.as_deref()?;
    let opacity = background.overlay_opacity?;
    if opacity.is_nan() || opacity <= 0.0 {
        return None;
    }
    let color = parse_or_warn(color, "overlay")?;
    Some(Overlay {
        color,
        opacity: opacity.min(1.0),
    })
}

fn parse_or_warn(value: &str, what: &str) -> Option<Color> {
    match Color::parse(value) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::warn!("ignoring {}: {}", what, err);
            None
        }
    }
}

/// Remembers a video playback failure for the rest of a call.
///
/// Once tripped, video backgrounds resolve to solid black and are never
/// retried. Other background kinds are unaffected.
#[derive(Clone, Debug, Default)]
pub struct VideoFallback {
    failure: Option<String>,
}

impl VideoFallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a playback error. Only the first reason is kept.
    pub fn report_error(&mut self, reason: impl Into<String>) {
        if self.failure.is_none() {
            let reason = reason.into();
            tracing::warn!("video background failed, using black: {}", reason);
            self.failure = Some(reason);
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Downgrade `resolved` if it is a video and playback has failed
    pub fn apply(&self, resolved: ResolvedBackground) -> ResolvedBackground {
        if self.has_failed() && resolved.is_video() {
            ResolvedBackground::black()
        } else {
            resolved
        }
    }
}

// ============================================================================
// Palette & avatar
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedPalette {
    pub primary: Color,
    pub danger: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,
    pub accent: Option<Color>,
}

/// Parse each entry, falling back to the default palette's entry on failure
pub fn resolve_palette(palette: &Palette) -> ResolvedPalette {
    let defaults = Palette::default();
    let pick = |value: &str, fallback: &str, what: &str| {
        parse_or_warn(value, what)
            .or_else(|| Color::parse(fallback).ok())
            .unwrap_or(Color::WHITE)
    };

    ResolvedPalette {
        primary: pick(&palette.primary, &defaults.primary, "primary color"),
        danger: pick(&palette.danger, &defaults.danger, "danger color"),
        text: pick(&palette.text, &defaults.text, "text color"),
        text_muted: pick(&palette.text_muted, &defaults.text_muted, "muted text color"),
        surface: pick(&palette.surface, &defaults.surface, "surface color"),
        accent: palette
            .accent
            .as_deref()
            .and_then(|c| parse_or_warn(c, "accent color")),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedAvatar {
    pub shape: AvatarShape,
    pub diameter: f32,
    /// 0 when the ring is off
    pub ring_width: f32,
    pub ring_color: Color,
    pub ring_style: RingStyle,
    pub show_shadow: bool,
}

pub fn resolve_avatar(avatar: &AvatarStyle, palette: &ResolvedPalette) -> ResolvedAvatar {
    let ring_width = match avatar.ring_style {
        RingStyle::None => 0.0,
        style => avatar
            .ring_width
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or_else(|| style.default_width()),
    };
    let ring_color = avatar
        .ring_color
        .as_deref()
        .and_then(|c| parse_or_warn(c, "ring color"))
        .unwrap_or(palette.primary);

    ResolvedAvatar {
        shape: avatar.shape,
        diameter: avatar.size.px(),
        ring_width,
        ring_color,
        ring_style: avatar.ring_style,
        show_shadow: avatar.show_shadow,
    }
}

// ============================================================================
// Whole theme
// ============================================================================

/// Caller-info visibility flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayFlags {
    pub caller_info: bool,
    pub country_flag: bool,
    pub company: bool,
    pub hd_badge: bool,
}

/// Everything the call screen needs from a theme, fully resolved
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedTheme {
    pub id: ThemeId,
    pub name: String,
    pub palette: ResolvedPalette,
    pub background: ResolvedBackground,
    pub avatar: ResolvedAvatar,
    pub answer_style: AnswerStyle,
    pub avatar_motion: AvatarMotion,
    pub incoming: IncomingTransition,
    pub flags: DisplayFlags,
}

/// Resolve a theme for display, honoring a tripped video fallback
pub fn resolve_theme(theme: &CallTheme, video: &VideoFallback) -> ResolvedTheme {
    let palette = resolve_palette(&theme.colors);
    let mut background = video.apply(resolve_background(&theme.background));
    background.motion = theme.animations.background_animation.unwrap_or_default();

    ResolvedTheme {
        id: theme.id.clone(),
        name: theme.name.clone(),
        avatar: resolve_avatar(&theme.avatar, &palette),
        palette,
        background,
        answer_style: theme.answer_style.clone(),
        avatar_motion: theme.animations.avatar_animation.unwrap_or_default(),
        incoming: theme.animations.incoming_animation.unwrap_or_default(),
        flags: DisplayFlags {
            caller_info: theme.show_caller_info,
            country_flag: theme.show_country_flag,
            company: theme.show_company,
            hd_badge: theme.show_hd_badge,
        },
    }
}
