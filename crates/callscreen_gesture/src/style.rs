//! Layout families
//!
//! Five stored answer styles collapse into four layouts: `classic` is drawn
//! exactly like `android`.

use callscreen_animation::Surface;
use callscreen_theme::AnswerStyleType;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    /// Swipe-to-answer track with a decline button beside it
    Slider,
    /// Decline, optional message and reminder, answer
    ButtonRow,
    /// Two large floating buttons
    Floating,
    /// Two outlined icon buttons
    Minimal,
}

impl LayoutStyle {
    pub fn normalize(kind: AnswerStyleType) -> Self {
        match kind {
            AnswerStyleType::Ios => Self::Slider,
            AnswerStyleType::Android | AnswerStyleType::Classic => Self::ButtonRow,
            AnswerStyleType::Floating => Self::Floating,
            AnswerStyleType::Minimal => Self::Minimal,
        }
    }

    /// Surface the answer control animates on
    pub fn surface(self) -> Surface {
        match self {
            Self::Slider => Surface::SliderThumb,
            Self::ButtonRow => Surface::ButtonRow,
            Self::Floating => Surface::Floating,
            Self::Minimal => Surface::Minimal,
        }
    }

    /// Whether message and reminder controls can appear
    pub fn has_secondary_controls(self) -> bool {
        self == Self::ButtonRow
    }

    /// Whether taps vibrate before committing
    pub fn haptic_on_tap(self) -> bool {
        self == Self::ButtonRow
    }
}

impl From<AnswerStyleType> for LayoutStyle {
    fn from(kind: AnswerStyleType) -> Self {
        Self::normalize(kind)
    }
}
