//! Built-in call theme catalog.
//!
//! Sixteen themes ship with the app. They are built once per process and
//! never change at runtime; editing one means duplicating it first.

use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use callscreen_animation::{AnimationKind, BackgroundMotion};

use crate::gradient::GradientDirection;
use crate::model::*;

/// Id of the theme used whenever nothing else resolves
pub const DEFAULT_THEME_ID: &str = "default";

const AUTHOR: &str = "Lifeos";

/// Built-in theme catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinTheme {
    Default,
    IosStyle,
    Minimal,
    Neon,
    Sunset,
    Ocean,
    DarkPurple,
    Nature,
    Galaxy,
    RoseGold,
    Cyberpunk,
    Aurora,
    Midnight,
    Fire,
    LuxuryGold,
    PureWhite,
}

impl BuiltinTheme {
    /// Stable theme id for storage.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => DEFAULT_THEME_ID,
            Self::IosStyle => "ios-style",
            Self::Minimal => "minimal",
            Self::Neon => "neon",
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::DarkPurple => "dark-purple",
            Self::Nature => "nature",
            Self::Galaxy => "galaxy",
            Self::RoseGold => "rose-gold",
            Self::Cyberpunk => "cyberpunk",
            Self::Aurora => "aurora",
            Self::Midnight => "midnight",
            Self::Fire => "fire",
            Self::LuxuryGold => "luxury-gold",
            Self::PureWhite => "pure-white",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Classic",
            Self::IosStyle => "iOS Style",
            Self::Minimal => "Minimal",
            Self::Neon => "Neon Glow",
            Self::Sunset => "Sunset",
            Self::Ocean => "Ocean",
            Self::DarkPurple => "Dark Purple",
            Self::Nature => "Nature",
            Self::Galaxy => "Galaxy",
            Self::RoseGold => "Rose Gold",
            Self::Cyberpunk => "Cyberpunk",
            Self::Aurora => "Aurora",
            Self::Midnight => "Midnight",
            Self::Fire => "Fire",
            Self::LuxuryGold => "Luxury Gold",
            Self::PureWhite => "Pure White",
        }
    }

    /// Full catalog, in display order.
    pub fn all() -> &'static [BuiltinTheme] {
        const PRESETS: [BuiltinTheme; 16] = [
            BuiltinTheme::Default,
            BuiltinTheme::IosStyle,
            BuiltinTheme::Minimal,
            BuiltinTheme::Neon,
            BuiltinTheme::Sunset,
            BuiltinTheme::Ocean,
            BuiltinTheme::DarkPurple,
            BuiltinTheme::Nature,
            BuiltinTheme::Galaxy,
            BuiltinTheme::RoseGold,
            BuiltinTheme::Cyberpunk,
            BuiltinTheme::Aurora,
            BuiltinTheme::Midnight,
            BuiltinTheme::Fire,
            BuiltinTheme::LuxuryGold,
            BuiltinTheme::PureWhite,
        ];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// The constructed theme.
    pub fn theme(self) -> &'static CallTheme {
        let index = Self::all()
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default();
        &builtin_themes()[index]
    }

    fn build(self) -> CallTheme {
        use AnimationKind as Anim;
        use AnswerStyleType as Style;
        use AvatarShape as Shape;
        use GradientDirection as Dir;

        let def = match self {
            Self::Default => PresetDef {
                description: "Default call screen",
                background: Background::solid("#1A1A2E"),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Pulse, None, 3.0, true),
                answer: answer(Style::Android, Anim::Pulse, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#4CAF50", "#F44336", "#FFFFFF", "rgba(255,255,255,0.7)", "rgba(255,255,255,0.1)", None),
                motion: motion(None, AvatarMotion::Pulse, IncomingTransition::Fade),
                flags: [true, true, true, true],
            },
            Self::IosStyle => PresetDef {
                description: "Apple-style incoming call",
                background: Background::gradient(["#1C1C1E", "#2C2C2E", "#3A3A3C"], Dir::TopBottom),
                avatar: AvatarStyle {
                    shape: Shape::Circle,
                    size: AvatarSize::Xlarge,
                    ring_style: RingStyle::None,
                    ring_color: None,
                    ring_width: None,
                    show_shadow: false,
                },
                answer: answer(Style::Ios, Anim::Glow, ButtonShape::Circle, ButtonSize::Medium, true),
                colors: palette("#30D158", "#FF453A", "#FFFFFF", "rgba(255,255,255,0.6)", "rgba(255,255,255,0.08)", None),
                motion: motion(None, AvatarMotion::None, IncomingTransition::Fade),
                flags: [true, false, true, false],
            },
            Self::Minimal => PresetDef {
                description: "Plain and clean",
                background: Background::solid("#000000"),
                avatar: avatar(Shape::Circle, AvatarSize::Medium, RingStyle::Solid, Some("#FFFFFF"), 2.0, false),
                answer: answer(Style::Minimal, Anim::None, ButtonShape::Circle, ButtonSize::Medium, false),
                colors: palette("#FFFFFF", "#FFFFFF", "#FFFFFF", "rgba(255,255,255,0.5)", "transparent", None),
                motion: motion(None, AvatarMotion::None, IncomingTransition::Fade),
                flags: [true, false, false, false],
            },
            Self::Neon => PresetDef {
                description: "Glowing neon accents",
                background: Background::gradient(["#0F0F23", "#1A1A3E", "#0F0F23"], Dir::Radial),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Glow, Some("#00FFFF"), 4.0, true),
                answer: answer(Style::Floating, Anim::Glow, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#00FF88", "#FF0066", "#FFFFFF", "#00FFFF", "rgba(0,255,255,0.1)", Some("#FF00FF")),
                motion: motion(Some(BackgroundMotion::Pulse), AvatarMotion::Glow, IncomingTransition::Scale),
                flags: [true; 4],
            },
            Self::Sunset => PresetDef {
                description: "Sunset colors",
                background: Background::gradient(["#FF6B6B", "#FEC89A", "#FFD93D", "#6BCB77"], Dir::DiagonalTl)
                    .with_overlay("#000000", 0.3),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Solid, Some("#FFFFFF"), 3.0, true),
                answer: answer(Style::Android, Anim::Bounce, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#6BCB77", "#FF6B6B", "#FFFFFF", "rgba(255,255,255,0.8)", "rgba(255,255,255,0.15)", None),
                motion: motion(Some(BackgroundMotion::SlowZoom), AvatarMotion::Float, IncomingTransition::SlideUp),
                flags: [true; 4],
            },
            Self::Ocean => PresetDef {
                description: "Ocean blues",
                background: Background::gradient(["#0077B6", "#00B4D8", "#90E0EF", "#CAF0F8"], Dir::TopBottom)
                    .with_overlay("#000000", 0.2),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Pulse, Some("#CAF0F8"), 4.0, true),
                answer: answer(Style::Classic, Anim::Ripple, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#00B4D8", "#FF6B6B", "#FFFFFF", "rgba(255,255,255,0.8)", "rgba(255,255,255,0.15)", None),
                motion: motion(Some(BackgroundMotion::SlowZoom), AvatarMotion::Pulse, IncomingTransition::Fade),
                flags: [true; 4],
            },
            Self::DarkPurple => PresetDef {
                description: "Deep purple tones",
                background: Background::gradient(
                    ["#1A0033", "#2D0A4E", "#4A1A6B", "#2D0A4E", "#1A0033"],
                    Dir::Radial,
                ),
                avatar: avatar(Shape::Rounded, AvatarSize::Large, RingStyle::Rainbow, None, 4.0, true),
                answer: answer(Style::Floating, Anim::Pulse, ButtonShape::Rounded, ButtonSize::Large, true),
                colors: palette("#9B59B6", "#E74C3C", "#FFFFFF", "rgba(255,255,255,0.7)", "rgba(155,89,182,0.2)", Some("#E056FD")),
                motion: motion(None, AvatarMotion::Glow, IncomingTransition::Scale),
                flags: [true; 4],
            },
            Self::Nature => PresetDef {
                description: "Natural greens",
                background: Background::gradient(["#134E4A", "#1E7A6E", "#2A9D8F", "#40C9A2"], Dir::DiagonalBl)
                    .with_overlay("#000000", 0.15),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Solid, Some("#40C9A2"), 3.0, true),
                answer: answer(Style::Android, Anim::Bounce, ButtonShape::Pill, ButtonSize::Large, true),
                colors: palette("#40C9A2", "#E76F51", "#FFFFFF", "rgba(255,255,255,0.8)", "rgba(64,201,162,0.15)", None),
                motion: motion(Some(BackgroundMotion::Pan), AvatarMotion::Float, IncomingTransition::SlideUp),
                flags: [true; 4],
            },
            Self::Galaxy => PresetDef {
                description: "Deep space",
                background: Background::gradient(
                    ["#0D0221", "#190A33", "#240B44", "#350055", "#0D0221"],
                    Dir::Radial,
                ),
                avatar: avatar(Shape::Circle, AvatarSize::Xlarge, RingStyle::Rainbow, None, 5.0, true),
                answer: answer(Style::Floating, Anim::Heartbeat, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#A855F7", "#EF4444", "#FFFFFF", "rgba(168,85,247,0.8)", "rgba(168,85,247,0.15)", Some("#EC4899")),
                motion: motion(Some(BackgroundMotion::SlowZoom), AvatarMotion::Glow, IncomingTransition::Scale),
                flags: [true; 4],
            },
            Self::RoseGold => PresetDef {
                description: "Soft rose gold",
                background: Background::gradient(["#2D1F2F", "#4A3040", "#6B4054", "#8B5A68"], Dir::DiagonalTr)
                    .with_overlay("#000000", 0.2),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Solid, Some("#E8B4B8"), 3.0, true),
                answer: answer(Style::Android, Anim::Pulse, ButtonShape::Pill, ButtonSize::Large, true),
                colors: palette("#E8B4B8", "#D4726A", "#FFFFFF", "rgba(232,180,184,0.8)", "rgba(232,180,184,0.1)", Some("#B76E79")),
                motion: motion(None, AvatarMotion::Pulse, IncomingTransition::Fade),
                flags: [true; 4],
            },
            Self::Cyberpunk => PresetDef {
                description: "Futuristic cyberpunk",
                background: Background::gradient(["#0A0A0A", "#1A0A2E", "#16213E", "#0F3460"], Dir::BottomTop),
                avatar: avatar(Shape::Square, AvatarSize::Large, RingStyle::Glow, Some("#F72585"), 4.0, true),
                answer: answer(Style::Floating, Anim::Jello, ButtonShape::Rounded, ButtonSize::Large, true),
                colors: palette("#4CC9F0", "#F72585", "#FFFFFF", "#4CC9F0", "rgba(76,201,240,0.1)", Some("#7209B7")),
                motion: motion(Some(BackgroundMotion::Pulse), AvatarMotion::Glow, IncomingTransition::Scale),
                flags: [true; 4],
            },
            Self::Aurora => PresetDef {
                description: "Northern lights",
                background: Background::gradient(
                    ["#0F172A", "#164E63", "#0D9488", "#34D399", "#164E63", "#0F172A"],
                    Dir::TopBottom,
                ),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Pulse, Some("#34D399"), 4.0, true),
                answer: answer(Style::Ios, Anim::Glow, ButtonShape::Circle, ButtonSize::Medium, true),
                colors: palette("#34D399", "#F87171", "#FFFFFF", "rgba(52,211,153,0.8)", "rgba(52,211,153,0.1)", Some("#0D9488")),
                motion: motion(Some(BackgroundMotion::SlowZoom), AvatarMotion::Float, IncomingTransition::SlideUp),
                flags: [true; 4],
            },
            Self::Midnight => PresetDef {
                description: "Midnight blues",
                background: Background::gradient(["#020617", "#0F172A", "#1E293B", "#334155"], Dir::TopBottom),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Solid, Some("#60A5FA"), 3.0, true),
                answer: answer(Style::Android, Anim::Bounce, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#60A5FA", "#F87171", "#FFFFFF", "rgba(148,163,184,0.9)", "rgba(96,165,250,0.1)", Some("#3B82F6")),
                motion: motion(None, AvatarMotion::Pulse, IncomingTransition::Fade),
                flags: [true; 4],
            },
            Self::Fire => PresetDef {
                description: "Flames",
                background: Background::gradient(
                    ["#1A0000", "#3D0000", "#7B0000", "#B91C1C", "#DC2626"],
                    Dir::BottomTop,
                ),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Glow, Some("#F97316"), 5.0, true),
                answer: answer(Style::Floating, Anim::Shake, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#22C55E", "#EF4444", "#FFFFFF", "rgba(251,146,60,0.9)", "rgba(249,115,22,0.15)", Some("#F97316")),
                motion: motion(Some(BackgroundMotion::Pulse), AvatarMotion::Glow, IncomingTransition::Scale),
                flags: [true; 4],
            },
            Self::LuxuryGold => PresetDef {
                description: "Luxury gold",
                background: Background::gradient(["#1C1C1C", "#2C2416", "#3D321E", "#4A3F28"], Dir::Radial)
                    .with_overlay("#000000", 0.3),
                avatar: avatar(Shape::Rounded, AvatarSize::Large, RingStyle::Solid, Some("#D4AF37"), 4.0, true),
                answer: answer(Style::Android, Anim::Tada, ButtonShape::Rounded, ButtonSize::Large, true),
                colors: palette("#D4AF37", "#8B0000", "#FFFFFF", "rgba(212,175,55,0.8)", "rgba(212,175,55,0.1)", Some("#FFD700")),
                motion: motion(None, AvatarMotion::Glow, IncomingTransition::Fade),
                flags: [true; 4],
            },
            Self::PureWhite => PresetDef {
                description: "Minimalist white",
                background: Background::solid("#FFFFFF"),
                avatar: avatar(Shape::Circle, AvatarSize::Large, RingStyle::Solid, Some("#E5E7EB"), 2.0, true),
                answer: answer(Style::Minimal, Anim::Pulse, ButtonShape::Circle, ButtonSize::Large, true),
                colors: palette("#10B981", "#EF4444", "#1F2937", "#6B7280", "#F3F4F6", Some("#3B82F6")),
                motion: motion(None, AvatarMotion::None, IncomingTransition::Fade),
                flags: [true; 4],
            },
        };

        def.into_theme(self)
    }
}

impl Display for BuiltinTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Every built-in theme, in catalog order.
pub fn builtin_themes() -> &'static [CallTheme] {
    static THEMES: OnceLock<Vec<CallTheme>> = OnceLock::new();
    THEMES.get_or_init(|| BuiltinTheme::all().iter().map(|p| p.build()).collect())
}

/// Built-in theme by id.
pub fn builtin_theme(id: &str) -> Option<&'static CallTheme> {
    builtin_themes().iter().find(|t| t.id == id)
}

pub fn is_builtin_id(id: &str) -> bool {
    BuiltinTheme::from_id(id).is_some()
}

/// The fallback theme.
pub fn default_theme() -> &'static CallTheme {
    BuiltinTheme::Default.theme()
}

struct PresetDef {
    description: &'static str,
    background: Background,
    avatar: AvatarStyle,
    answer: AnswerStyle,
    colors: Palette,
    motion: ThemeAnimations,
    /// caller info, country flag, company, HD badge
    flags: [bool; 4],
}

impl PresetDef {
    fn into_theme(self, preset: BuiltinTheme) -> CallTheme {
        let key = camel_key(preset.id());
        let [show_caller_info, show_country_flag, show_company, show_hd_badge] = self.flags;

        CallTheme {
            name_key: Some(format!("callThemes.{key}")),
            description: Some(self.description.to_string()),
            description_key: Some(format!("callThemes.{key}Desc")),
            author: Some(AUTHOR.to_string()),
            background: self.background,
            avatar: self.avatar,
            answer_style: self.answer,
            colors: self.colors,
            animations: self.motion,
            show_caller_info,
            show_country_flag,
            show_company,
            show_hd_badge,
            ..CallTheme::new(preset.id(), preset.display_name())
        }
    }
}

/// `rose-gold` -> `roseGold`
fn camel_key(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut upper = false;
    for c in id.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn avatar(
    shape: AvatarShape,
    size: AvatarSize,
    ring_style: RingStyle,
    ring_color: Option<&str>,
    ring_width: f32,
    show_shadow: bool,
) -> AvatarStyle {
    AvatarStyle {
        shape,
        size,
        ring_style,
        ring_color: ring_color.map(str::to_string),
        ring_width: Some(ring_width),
        show_shadow,
    }
}

fn answer(
    kind: AnswerStyleType,
    animation: AnimationKind,
    button_shape: ButtonShape,
    button_size: ButtonSize,
    show_labels: bool,
) -> AnswerStyle {
    AnswerStyle {
        kind,
        animation,
        button_shape,
        button_size,
        show_labels,
        haptic_feedback: true,
    }
}

fn palette(
    primary: &str,
    danger: &str,
    text: &str,
    text_muted: &str,
    surface: &str,
    accent: Option<&str>,
) -> Palette {
    Palette {
        primary: primary.into(),
        danger: danger.into(),
        text: text.into(),
        text_muted: text_muted.into(),
        surface: surface.into(),
        accent: accent.map(str::to_string),
    }
}

fn motion(
    background: Option<BackgroundMotion>,
    avatar: AvatarMotion,
    incoming: IncomingTransition,
) -> ThemeAnimations {
    ThemeAnimations {
        background_animation: background,
        avatar_animation: Some(avatar),
        incoming_animation: Some(incoming),
    }
}
