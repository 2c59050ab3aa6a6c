//! Answer surface layout
//!
//! Sizes, radii and which controls exist for each layout family. All
//! measurements are logical px.

use callscreen_animation::{AnimationKind, Channel, ChannelSet, KindApplicability};
use callscreen_theme::{AnswerStyle, ButtonShape, ButtonSize};
use serde::Serialize;
use smallvec::SmallVec;

use crate::actions::{Capabilities, Intent};
use crate::style::LayoutStyle;

pub const SECONDARY_DIAMETER: f32 = 56.0;
pub const SECONDARY_ICON: f32 = 24.0;
pub const FLOATING_DIAMETER: f32 = 80.0;
pub const FLOATING_ICON: f32 = 32.0;
pub const MINIMAL_DIAMETER: f32 = 72.0;
pub const MINIMAL_ICON: f32 = 36.0;
pub const MINIMAL_BORDER: f32 = 2.0;
pub const SLIDER_THUMB: f32 = 48.0;
pub const SLIDER_INSET: f32 = 8.0;
pub const SLIDER_HEIGHT: f32 = 64.0;
pub const SLIDER_DECLINE: f32 = 64.0;
pub const SLIDER_ICON: f32 = 28.0;

/// Diameter and icon size for the main buttons of the button row
pub fn button_metrics(size: ButtonSize) -> (f32, f32) {
    match size {
        ButtonSize::Small => (56.0, 24.0),
        ButtonSize::Medium => (64.0, 28.0),
        ButtonSize::Large => (72.0, 32.0),
    }
}

pub fn corner_radius(shape: ButtonShape, diameter: f32) -> f32 {
    match shape {
        ButtonShape::Rounded => diameter / 4.0,
        ButtonShape::Circle | ButtonShape::Pill => diameter / 2.0,
    }
}

/// Palette entry a control is painted with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Danger,
    Surface,
}

/// One pressable control
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Affordance {
    pub intent: Intent,
    pub diameter: f32,
    pub icon_size: f32,
    pub corner_radius: f32,
    pub role: ColorRole,
    /// Stroke width for outlined buttons, 0 when filled
    pub border_width: f32,
    pub label: Option<&'static str>,
    /// Motion channels the control renders; everything else stays at rest
    pub channels: ChannelSet,
}

/// The swipe track
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SliderMetrics {
    pub track_width: f32,
    pub track_height: f32,
    pub thumb_size: f32,
    pub inset: f32,
    pub label: &'static str,
}

impl SliderMetrics {
    pub fn new(track_width: f32) -> Self {
        Self {
            track_width: track_width.max(SLIDER_THUMB),
            track_height: SLIDER_HEIGHT,
            thumb_size: SLIDER_THUMB,
            inset: SLIDER_INSET,
            label: "slide to answer",
        }
    }

    /// How far the thumb can travel
    pub fn travel(&self) -> f32 {
        (self.track_width - self.thumb_size).max(0.0)
    }
}

/// Everything the answer area draws
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerLayout {
    pub style: LayoutStyle,
    pub animation: AnimationKind,
    /// Controls in display order, left to right
    pub controls: SmallVec<[Affordance; 4]>,
    /// Present only for the slider layout; the thumb carries the answer
    /// intent and is not listed in `controls`
    pub slider: Option<SliderMetrics>,
    pub thumb_channels: ChannelSet,
}

impl AnswerLayout {
    pub fn build(answer: &AnswerStyle, track_width: f32, capabilities: Capabilities) -> Self {
        let style = LayoutStyle::normalize(answer.kind);
        let kind = answer.animation;
        let mut controls = SmallVec::new();
        let mut slider = None;
        let mut thumb_channels = ChannelSet::new();

        match style {
            LayoutStyle::Slider => {
                controls.push(Affordance {
                    intent: Intent::Decline,
                    diameter: SLIDER_DECLINE,
                    icon_size: SLIDER_ICON,
                    corner_radius: SLIDER_DECLINE / 2.0,
                    role: ColorRole::Danger,
                    border_width: 0.0,
                    label: None,
                    channels: ChannelSet::new(),
                });
                slider = Some(SliderMetrics::new(track_width));
                thumb_channels = KindApplicability::channels(style.surface(), kind);
            }
            LayoutStyle::ButtonRow => {
                let (diameter, icon_size) = button_metrics(answer.button_size);
                let radius = corner_radius(answer.button_shape, diameter);
                let label = |text: &'static str| answer.show_labels.then_some(text);
                let main = |intent: Intent,
                            role: ColorRole,
                            text: &'static str,
                            channels: ChannelSet| Affordance {
                    intent,
                    diameter,
                    icon_size,
                    corner_radius: radius,
                    role,
                    border_width: 0.0,
                    label: label(text),
                    channels,
                };
                let secondary = |intent: Intent, text: &'static str| Affordance {
                    intent,
                    diameter: SECONDARY_DIAMETER,
                    icon_size: SECONDARY_ICON,
                    corner_radius: corner_radius(answer.button_shape, SECONDARY_DIAMETER),
                    role: ColorRole::Surface,
                    border_width: 0.0,
                    label: label(text),
                    channels: ChannelSet::new(),
                };

                controls.push(main(
                    Intent::Decline,
                    ColorRole::Danger,
                    "Decline",
                    ChannelSet::new(),
                ));
                if style.has_secondary_controls() {
                    if capabilities.message {
                        controls.push(secondary(Intent::Message, "Message"));
                    }
                    if capabilities.reminder {
                        controls.push(secondary(Intent::Reminder, "Remind"));
                    }
                }
                controls.push(main(
                    Intent::Answer,
                    ColorRole::Primary,
                    "Answer",
                    KindApplicability::channels(style.surface(), kind),
                ));
            }
            LayoutStyle::Floating => {
                let answer_channels = KindApplicability::channels(style.surface(), kind);
                let decline_channels: ChannelSet = answer_channels
                    .iter()
                    .copied()
                    .filter(|c| *c == Channel::Glow)
                    .collect();
                let floating = |intent: Intent, role: ColorRole, channels: ChannelSet| Affordance {
                    intent,
                    diameter: FLOATING_DIAMETER,
                    icon_size: FLOATING_ICON,
                    corner_radius: FLOATING_DIAMETER / 2.0,
                    role,
                    border_width: 0.0,
                    label: None,
                    channels,
                };
                controls.push(floating(Intent::Decline, ColorRole::Danger, decline_channels));
                controls.push(floating(Intent::Answer, ColorRole::Primary, answer_channels));
            }
            LayoutStyle::Minimal => {
                let outlined = |intent: Intent, role: ColorRole| Affordance {
                    intent,
                    diameter: MINIMAL_DIAMETER,
                    icon_size: MINIMAL_ICON,
                    corner_radius: MINIMAL_DIAMETER / 2.0,
                    role,
                    border_width: MINIMAL_BORDER,
                    label: None,
                    channels: ChannelSet::new(),
                };
                controls.push(outlined(Intent::Decline, ColorRole::Danger));
                controls.push(outlined(Intent::Answer, ColorRole::Primary));
            }
        }

        Self {
            style,
            animation: kind,
            controls,
            slider,
            thumb_channels,
        }
    }

    pub fn control(&self, intent: Intent) -> Option<&Affordance> {
        self.controls.iter().find(|c| c.intent == intent)
    }

    pub fn has_control(&self, intent: Intent) -> bool {
        self.control(intent).is_some()
    }
}
