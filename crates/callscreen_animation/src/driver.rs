//! Animation driver
//!
//! Owns one set of motion values and at most one running choreography.
//! Starting, switching or stopping always stops the running sequence and
//! returns every value to rest before anything else happens, so no frame
//! ever mixes two kinds.

use crate::choreography::{Choreography, ChoreographyPlayer};
use crate::motion::MotionValues;
use crate::presets::AnimationKind;

pub struct AnimationDriver {
    kind: AnimationKind,
    player: Option<ChoreographyPlayer>,
    values: MotionValues,
    elapsed_ms: f32,
}

impl AnimationDriver {
    /// Idle driver with all values at rest
    pub fn new() -> Self {
        Self {
            kind: AnimationKind::None,
            player: None,
            values: MotionValues::REST,
            elapsed_ms: 0.0,
        }
    }

    /// Driver already playing `kind`
    pub fn with_kind(kind: AnimationKind) -> Self {
        let mut driver = Self::new();
        driver.start(kind);
        driver
    }

    /// Stop whatever is running, reset, and begin `kind` from its first step
    pub fn start(&mut self, kind: AnimationKind) {
        self.stop();
        self.kind = kind;
        if kind != AnimationKind::None {
            self.player = Some(kind.choreography().player());
        }
        tracing::debug!("animation driver started {}", kind);
    }

    /// Play an arbitrary choreography (background loops, previews)
    pub fn play(&mut self, choreography: Choreography) {
        self.stop();
        self.kind = AnimationKind::None;
        if !choreography.is_empty() {
            self.player = Some(choreography.player());
        }
    }

    /// Switch kinds. Re-selecting the kind that is already running is a no-op.
    pub fn set_kind(&mut self, kind: AnimationKind) {
        let running_same = kind != AnimationKind::None && kind == self.kind && self.player.is_some();
        let already_idle = kind == AnimationKind::None && self.player.is_none();
        if running_same || already_idle {
            return;
        }
        self.start(kind);
    }

    /// Stop and reset every value to rest
    pub fn stop(&mut self) {
        if self.player.take().is_some() {
            tracing::trace!("animation driver stopped {}", self.kind);
        }
        self.kind = AnimationKind::None;
        self.values.reset();
        self.elapsed_ms = 0.0;
    }

    /// Advance by one host frame
    pub fn tick(&mut self, dt_ms: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        self.elapsed_ms += dt_ms;
        player.tick(dt_ms, &mut self.values);
        if player.is_finished() {
            self.player = None;
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.player.is_some()
    }

    pub fn values(&self) -> MotionValues {
        self.values
    }

    /// Time since the current choreography started
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_static() {
        let mut driver = AnimationDriver::with_kind(AnimationKind::None);
        driver.tick(500.0);
        assert!(!driver.is_running());
        assert!(driver.values().is_at_rest());
    }

    #[test]
    fn pulse_moves_scale() {
        let mut driver = AnimationDriver::with_kind(AnimationKind::Pulse);
        driver.tick(300.0);
        assert!(driver.values().scale > 1.0);
        assert_eq!(driver.values().glow, 0.0);
    }

    #[test]
    fn switching_kind_resets_before_first_frame() {
        let mut driver = AnimationDriver::with_kind(AnimationKind::Wobble);
        driver.tick(75.0);
        assert!(!driver.values().is_at_rest());

        driver.set_kind(AnimationKind::Glow);
        assert!(driver.values().is_at_rest());
        assert_eq!(driver.kind(), AnimationKind::Glow);
        assert_eq!(driver.elapsed_ms(), 0.0);
    }

    #[test]
    fn same_kind_does_not_restart() {
        let mut driver = AnimationDriver::with_kind(AnimationKind::Glow);
        driver.tick(500.0);
        let glow = driver.values().glow;
        driver.set_kind(AnimationKind::Glow);
        assert_eq!(driver.values().glow, glow);
    }

    #[test]
    fn stop_resets_values() {
        let mut driver = AnimationDriver::with_kind(AnimationKind::Flash);
        driver.tick(100.0);
        assert!(driver.values().opacity < 1.0);
        driver.stop();
        assert!(!driver.is_running());
        assert!(driver.values().is_at_rest());
    }

    #[test]
    fn loops_indefinitely() {
        let mut driver = AnimationDriver::with_kind(AnimationKind::Heartbeat);
        for _ in 0..600 {
            driver.tick(1000.0 / 60.0);
        }
        assert!(driver.is_running());
    }
}
