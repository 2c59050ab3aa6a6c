//! Input events
//!
//! Events the presentation layer hands back to the engine: raw pointer input
//! on the answer slider, taps on discrete controls, media playback faults and
//! screen lifecycle.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer capture lost (system gesture, incoming overlay)
    pub const POINTER_CANCEL: EventType = 4;
    /// Discrete press on a control
    pub const TAP: EventType = 8;

    // Engine-internal completion signals
    /// A commit animation reached its far rail
    pub const COMMIT_ANIMATION_DONE: EventType = 12;
    /// A snap-back spring came to rest
    pub const SETTLED: EventType = 13;
    /// A drag was released past the commit threshold
    pub const RELEASE_COMMIT: EventType = 14;

    // Media events
    pub const VIDEO_ERROR: EventType = 40;

    // Screen lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// The control an event is aimed at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    AnswerButton,
    DeclineButton,
    MessageButton,
    ReminderButton,
    SliderThumb,
    Background,
    Screen,
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: Target,
    pub data: EventData,
    /// Milliseconds since the session started
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Pointer position relative to where the current gesture started
    Pointer { dx: f32, dy: f32 },
    /// Media playback failure reported by the renderer
    Media { message: String },
    None,
}

impl Event {
    pub fn pointer_down(target: Target) -> Self {
        Self::pointer(event_types::POINTER_DOWN, target, 0.0, 0.0)
    }

    pub fn pointer_move(target: Target, dx: f32, dy: f32) -> Self {
        Self::pointer(event_types::POINTER_MOVE, target, dx, dy)
    }

    pub fn pointer_up(target: Target, dx: f32, dy: f32) -> Self {
        Self::pointer(event_types::POINTER_UP, target, dx, dy)
    }

    pub fn pointer_cancel(target: Target) -> Self {
        Self::pointer(event_types::POINTER_CANCEL, target, 0.0, 0.0)
    }

    pub fn tap(target: Target) -> Self {
        Self {
            event_type: event_types::TAP,
            target,
            data: EventData::None,
            timestamp: 0,
        }
    }

    pub fn video_error(message: impl Into<String>) -> Self {
        Self {
            event_type: event_types::VIDEO_ERROR,
            target: Target::Background,
            data: EventData::Media {
                message: message.into(),
            },
            timestamp: 0,
        }
    }

    pub fn unmount() -> Self {
        Self {
            event_type: event_types::UNMOUNT,
            target: Target::Screen,
            data: EventData::None,
            timestamp: 0,
        }
    }

    fn pointer(event_type: EventType, target: Target, dx: f32, dy: f32) -> Self {
        Self {
            event_type,
            target,
            data: EventData::Pointer { dx, dy },
            timestamp: 0,
        }
    }

    /// Builder: stamp the event with a session timestamp
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Horizontal displacement for pointer events, 0 otherwise
    pub fn dx(&self) -> f32 {
        match self.data {
            EventData::Pointer { dx, .. } => dx,
            _ => 0.0,
        }
    }
}
