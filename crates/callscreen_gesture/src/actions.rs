//! Collaborator seams
//!
//! The controller never calls out directly. It returns [`Effect`]s in the
//! order they must happen, and the session hands them to the host's
//! [`CallActions`] and [`HapticFeedback`] implementations.

use serde::Serialize;
use smallvec::SmallVec;

/// What a committed interaction asks the call layer to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Answer,
    Decline,
    /// Decline with a canned text reply
    Message,
    /// Decline and remind later
    Reminder,
}

/// Vibration patterns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticKind {
    /// Grab of the slider thumb or a button press
    Tick,
    /// Slider reached the far rail
    Confirm,
}

impl HapticKind {
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Tick => 10,
            Self::Confirm => 50,
        }
    }
}

/// Side effect requested by a controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "lowercase")]
pub enum Effect {
    Haptic(HapticKind),
    Emit(Intent),
}

pub type Effects = SmallVec<[Effect; 2]>;

/// The call layer receiving committed intents
///
/// Message and reminder are optional: a host that cannot handle them leaves
/// the defaults, and the matching controls are never shown.
pub trait CallActions {
    fn on_answer(&mut self);

    fn on_decline(&mut self);

    fn on_message(&mut self) {}

    fn on_reminder(&mut self) {}

    fn supports_message(&self) -> bool {
        false
    }

    fn supports_reminder(&self) -> bool {
        false
    }

    /// Route an intent to its callback
    fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Answer => self.on_answer(),
            Intent::Decline => self.on_decline(),
            Intent::Message => self.on_message(),
            Intent::Reminder => self.on_reminder(),
        }
    }
}

pub trait HapticFeedback {
    fn impact(&mut self, kind: HapticKind);
}

/// Haptics sink for hosts without a vibrator
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn impact(&mut self, _kind: HapticKind) {}
}

/// Which optional controls the host can handle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub message: bool,
    pub reminder: bool,
}

impl Capabilities {
    pub fn of(actions: &dyn CallActions) -> Self {
        Self {
            message: actions.supports_message(),
            reminder: actions.supports_reminder(),
        }
    }
}
