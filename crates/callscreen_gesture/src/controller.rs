//! Commit controller
//!
//! Turns input on the answer surface into at most one committed [`Intent`].
//!
//! Slider layout:
//!
//! ```text
//!            down             up < threshold
//!   Idle ──────────► Dragging ──────────────► SnapBack ──settled──► Idle
//!    ▲                  │  ▲                     │
//!    │                  │  └──────── down ───────┘
//!    │                  │ up ≥ threshold
//!    │                  ▼
//!    │              Committing ──animation done──► Committed(Answer)
//!    │
//!    └── tap decline (Idle, Dragging, SnapBack) ──► Committed(Decline)
//! ```
//!
//! Discrete layouts go straight from `Idle` to `Committed` on a tap.
//! `Committed` is terminal: every later event is ignored.

use callscreen_animation::{Easing, Spring, SpringConfig};
use callscreen_core::events::event_types;
use callscreen_core::{Event, StateMachine, Target};
use callscreen_theme::AnswerStyle;
use serde::Serialize;
use smallvec::smallvec;

use crate::actions::{Capabilities, Effect, Effects, HapticKind, Intent};
use crate::layout::AnswerLayout;
use crate::style::LayoutStyle;

mod states {
    use callscreen_core::StateId;

    pub const IDLE: StateId = 0;
    pub const DRAGGING: StateId = 1;
    pub const SNAP_BACK: StateId = 2;
    pub const COMMITTING: StateId = 3;
    pub const COMMITTED: StateId = 4;
}

/// Default distance a slider release must cover to answer
pub const COMMIT_THRESHOLD: f32 = 100.0;
/// Default duration of the thumb's run to the far rail
pub const COMMIT_DURATION_MS: u32 = 200;
/// Default slider track width
pub const TRACK_WIDTH: f32 = 298.0;

/// Tunables for the answer surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    pub track_width: f32,
    pub commit_threshold: f32,
    pub commit_duration_ms: u32,
    /// Spring that returns the thumb after a short drag
    pub snap_back: SpringConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            track_width: TRACK_WIDTH,
            commit_threshold: COMMIT_THRESHOLD,
            commit_duration_ms: COMMIT_DURATION_MS,
            snap_back: SpringConfig::default(),
        }
    }
}

/// Observable controller state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "intent", rename_all = "kebab-case")]
pub enum ControllerState {
    Idle,
    Dragging,
    SnapBack,
    Committing,
    Committed(Intent),
}

/// Thumb motion between input events
#[derive(Clone, Debug)]
enum ThumbMotion {
    Still,
    Commit {
        from: f32,
        to: f32,
        elapsed_ms: f32,
        duration_ms: f32,
    },
    SnapBack(Spring),
}

pub struct CommitController {
    layout: AnswerLayout,
    config: ControllerConfig,
    haptics: bool,
    disabled: bool,
    fsm: StateMachine,
    offset: f32,
    grab_offset: f32,
    motion: ThumbMotion,
    committed: Option<Intent>,
}

impl CommitController {
    pub fn new(answer: &AnswerStyle, config: ControllerConfig, capabilities: Capabilities) -> Self {
        let layout = AnswerLayout::build(answer, config.track_width, capabilities);
        let fsm = match layout.style {
            LayoutStyle::Slider => slider_machine(),
            _ => discrete_machine(),
        };
        tracing::debug!(
            "commit controller for {:?} (animation {}, haptics {})",
            layout.style,
            answer.animation,
            answer.haptic_feedback
        );

        Self {
            layout,
            config,
            haptics: answer.haptic_feedback,
            disabled: false,
            fsm,
            offset: 0.0,
            grab_offset: 0.0,
            motion: ThumbMotion::Still,
            committed: None,
        }
    }

    pub fn layout(&self) -> &AnswerLayout {
        &self.layout
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        match self.fsm.current_state() {
            states::DRAGGING => ControllerState::Dragging,
            states::SNAP_BACK => ControllerState::SnapBack,
            states::COMMITTING => ControllerState::Committing,
            states::COMMITTED => match self.committed {
                Some(intent) => ControllerState::Committed(intent),
                None => ControllerState::Idle,
            },
            _ => ControllerState::Idle,
        }
    }

    /// The committed intent, once there is one
    pub fn committed(&self) -> Option<Intent> {
        self.committed
    }

    /// Current thumb offset from the left rail, 0 for discrete layouts
    pub fn thumb_offset(&self) -> f32 {
        self.offset
    }

    /// While disabled every input is dropped. Running thumb motion continues.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn travel(&self) -> f32 {
        self.layout.slider.map(|s| s.travel()).unwrap_or(0.0)
    }

    /// Feed one input event
    pub fn handle(&mut self, event: &Event) -> Effects {
        if self.disabled || self.fsm.is_finished() {
            return Effects::new();
        }

        match (event.event_type, event.target) {
            (event_types::TAP, target) => self.tap(target),
            (event_types::POINTER_DOWN, Target::SliderThumb) => self.grab(),
            (event_types::POINTER_MOVE, Target::SliderThumb) => {
                if self.fsm.try_send(event_types::POINTER_MOVE).is_some() {
                    self.offset = (self.grab_offset + event.dx()).clamp(0.0, self.travel());
                }
                Effects::new()
            }
            (event_types::POINTER_UP, Target::SliderThumb) => {
                if self.fsm.is_in(states::DRAGGING) {
                    self.offset = (self.grab_offset + event.dx()).clamp(0.0, self.travel());
                    self.release();
                }
                Effects::new()
            }
            (event_types::POINTER_CANCEL, Target::SliderThumb) => {
                if self.fsm.is_in(states::DRAGGING) {
                    self.snap_back();
                }
                Effects::new()
            }
            _ => Effects::new(),
        }
    }

    fn grab(&mut self) -> Effects {
        if self.fsm.try_send(event_types::POINTER_DOWN).is_none() {
            return Effects::new();
        }
        // Catch the thumb wherever a snap-back left it
        self.motion = ThumbMotion::Still;
        self.grab_offset = self.offset;
        if self.haptics {
            smallvec![Effect::Haptic(HapticKind::Tick)]
        } else {
            Effects::new()
        }
    }

    fn release(&mut self) {
        let threshold = self.config.commit_threshold.min(self.travel());
        if self.travel() > 0.0 && self.offset >= threshold {
            self.fsm.send(event_types::RELEASE_COMMIT);
            tracing::debug!("slider released at {:.1}px, committing", self.offset);
            self.motion = ThumbMotion::Commit {
                from: self.offset,
                to: self.travel(),
                elapsed_ms: 0.0,
                duration_ms: self.config.commit_duration_ms as f32,
            };
        } else {
            tracing::trace!("slider released at {:.1}px, snapping back", self.offset);
            self.snap_back();
        }
    }

    fn snap_back(&mut self) {
        self.fsm.send(event_types::POINTER_UP);
        let mut spring = Spring::new(self.config.snap_back, self.offset);
        spring.set_target(0.0);
        self.motion = ThumbMotion::SnapBack(spring);
    }

    fn tap(&mut self, target: Target) -> Effects {
        let intent = match target {
            Target::AnswerButton => Intent::Answer,
            Target::DeclineButton => Intent::Decline,
            Target::MessageButton => Intent::Message,
            Target::ReminderButton => Intent::Reminder,
            _ => return Effects::new(),
        };
        if !self.layout.has_control(intent) {
            tracing::trace!("tap on absent {:?} control ignored", intent);
            return Effects::new();
        }
        if self.fsm.try_send(event_types::TAP).is_none() {
            return Effects::new();
        }

        self.motion = ThumbMotion::Still;
        self.committed = Some(intent);
        tracing::debug!("committed {:?} by tap", intent);

        let mut effects = Effects::new();
        let main_button = matches!(intent, Intent::Answer | Intent::Decline);
        if self.haptics && main_button && self.layout.style.haptic_on_tap() {
            effects.push(Effect::Haptic(HapticKind::Tick));
        }
        effects.push(Effect::Emit(intent));
        effects
    }

    /// Advance thumb motion by one host frame
    pub fn tick(&mut self, dt_ms: f32) -> Effects {
        if dt_ms <= 0.0 {
            return Effects::new();
        }

        match &mut self.motion {
            ThumbMotion::Still => Effects::new(),
            ThumbMotion::Commit {
                from,
                to,
                elapsed_ms,
                duration_ms,
            } => {
                *elapsed_ms += dt_ms;
                let t = if *duration_ms > 0.0 {
                    (*elapsed_ms / *duration_ms).min(1.0)
                } else {
                    1.0
                };
                self.offset = *from + (*to - *from) * Easing::STANDARD.apply(t);
                if t < 1.0 {
                    return Effects::new();
                }

                self.offset = *to;
                self.motion = ThumbMotion::Still;
                self.fsm.send(event_types::COMMIT_ANIMATION_DONE);
                self.committed = Some(Intent::Answer);
                tracing::debug!("committed Answer by swipe");

                let mut effects = Effects::new();
                if self.haptics {
                    effects.push(Effect::Haptic(HapticKind::Confirm));
                }
                effects.push(Effect::Emit(Intent::Answer));
                effects
            }
            ThumbMotion::SnapBack(spring) => {
                spring.step(dt_ms / 1000.0);
                self.offset = spring.value().max(0.0);
                if spring.is_settled() {
                    self.offset = 0.0;
                    self.motion = ThumbMotion::Still;
                    self.fsm.send(event_types::SETTLED);
                }
                Effects::new()
            }
        }
    }

    /// Whether the thumb is still moving
    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, ThumbMotion::Still)
    }
}

fn slider_machine() -> StateMachine {
    use event_types::*;
    use states::*;

    StateMachine::builder(IDLE)
        .name("answer-slider")
        .on(IDLE, POINTER_DOWN, DRAGGING)
        .on(SNAP_BACK, POINTER_DOWN, DRAGGING)
        .on(DRAGGING, POINTER_MOVE, DRAGGING)
        .on(DRAGGING, POINTER_UP, SNAP_BACK)
        .on(DRAGGING, RELEASE_COMMIT, COMMITTING)
        .on(SNAP_BACK, SETTLED, IDLE)
        .on(COMMITTING, COMMIT_ANIMATION_DONE, COMMITTED)
        .on(IDLE, TAP, COMMITTED)
        .on(DRAGGING, TAP, COMMITTED)
        .on(SNAP_BACK, TAP, COMMITTED)
        .terminal(COMMITTED)
        .build()
}

fn discrete_machine() -> StateMachine {
    use states::*;

    StateMachine::builder(IDLE)
        .name("answer-buttons")
        .on(IDLE, event_types::TAP, COMMITTED)
        .terminal(COMMITTED)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use callscreen_theme::AnswerStyleType;

    fn slider() -> CommitController {
        let answer = AnswerStyle {
            kind: AnswerStyleType::Ios,
            ..AnswerStyle::default()
        };
        CommitController::new(&answer, ControllerConfig::default(), Capabilities::default())
    }

    #[test]
    fn move_is_clamped_to_the_track() {
        let mut c = slider();
        c.handle(&Event::pointer_down(Target::SliderThumb));
        c.handle(&Event::pointer_move(Target::SliderThumb, -40.0, 0.0));
        assert_eq!(c.thumb_offset(), 0.0);
        c.handle(&Event::pointer_move(Target::SliderThumb, 1000.0, 3.0));
        assert_eq!(c.thumb_offset(), 250.0);
    }

    #[test]
    fn moves_without_grab_are_ignored() {
        let mut c = slider();
        c.handle(&Event::pointer_move(Target::SliderThumb, 80.0, 0.0));
        assert_eq!(c.thumb_offset(), 0.0);
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn cancel_snaps_back() {
        let mut c = slider();
        c.handle(&Event::pointer_down(Target::SliderThumb));
        c.handle(&Event::pointer_move(Target::SliderThumb, 150.0, 0.0));
        c.handle(&Event::pointer_cancel(Target::SliderThumb));
        assert_eq!(c.state(), ControllerState::SnapBack);
        assert!(c.committed().is_none());
    }

    #[test]
    fn disabled_controller_drops_input() {
        let mut c = slider();
        c.set_disabled(true);
        assert!(c.handle(&Event::tap(Target::DeclineButton)).is_empty());
        assert!(c.committed().is_none());
        c.set_disabled(false);
        assert_eq!(
            c.handle(&Event::tap(Target::DeclineButton)).as_slice(),
            &[Effect::Emit(Intent::Decline)]
        );
    }
}
