//! Motion scheduler
//!
//! Holds every animation driver on screen (answer button, slider thumb,
//! background) and advances them together from the host frame clock.

use slotmap::{new_key_type, SlotMap};

use crate::driver::AnimationDriver;

new_key_type! {
    pub struct DriverId;
}

/// The scheduler that ticks all active drivers
pub struct MotionScheduler {
    drivers: SlotMap<DriverId, AnimationDriver>,
    target_fps: u32,
}

impl MotionScheduler {
    pub fn new() -> Self {
        Self {
            drivers: SlotMap::with_key(),
            target_fps: 60,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Frame length at the target rate
    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.target_fps as f32
    }

    pub fn add(&mut self, driver: AnimationDriver) -> DriverId {
        self.drivers.insert(driver)
    }

    pub fn get(&self, id: DriverId) -> Option<&AnimationDriver> {
        self.drivers.get(id)
    }

    pub fn get_mut(&mut self, id: DriverId) -> Option<&mut AnimationDriver> {
        self.drivers.get_mut(id)
    }

    /// Remove a driver; its values are reset as it goes
    pub fn remove(&mut self, id: DriverId) -> Option<AnimationDriver> {
        let mut driver = self.drivers.remove(id)?;
        driver.stop();
        Some(driver)
    }

    /// Tick all drivers by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        for (_, driver) in self.drivers.iter_mut() {
            driver.tick(dt_ms);
        }
    }

    /// Tick by one frame at the target rate
    pub fn tick_frame(&mut self) {
        self.tick(self.frame_interval_ms());
    }

    /// Stop every driver and reset all values
    pub fn stop_all(&mut self) {
        for (_, driver) in self.drivers.iter_mut() {
            driver.stop();
        }
    }

    pub fn has_active_animations(&self) -> bool {
        self.drivers.iter().any(|(_, d)| d.is_running())
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::AnimationKind;

    #[test]
    fn ticks_every_driver() {
        let mut scheduler = MotionScheduler::new();
        let a = scheduler.add(AnimationDriver::with_kind(AnimationKind::Pulse));
        let b = scheduler.add(AnimationDriver::with_kind(AnimationKind::Glow));

        scheduler.tick(300.0);

        assert!(scheduler.get(a).unwrap().values().scale > 1.0);
        assert!(scheduler.get(b).unwrap().values().glow > 0.0);
        assert!(scheduler.has_active_animations());
    }

    #[test]
    fn stop_all_resets() {
        let mut scheduler = MotionScheduler::new();
        let id = scheduler.add(AnimationDriver::with_kind(AnimationKind::Pulse));
        scheduler.tick(300.0);
        scheduler.stop_all();

        assert!(!scheduler.has_active_animations());
        assert!(scheduler.get(id).unwrap().values().is_at_rest());
    }

    #[test]
    fn frame_interval_follows_fps() {
        let mut scheduler = MotionScheduler::new();
        scheduler.set_target_fps(120);
        assert!((scheduler.frame_interval_ms() - 8.333).abs() < 0.01);
        scheduler.set_target_fps(0);
        assert_eq!(scheduler.target_fps(), 1);
    }

    #[test]
    fn remove_returns_stopped_driver() {
        let mut scheduler = MotionScheduler::new();
        let id = scheduler.add(AnimationDriver::with_kind(AnimationKind::Rotate));
        scheduler.tick(100.0);
        let driver = scheduler.remove(id).unwrap();
        assert!(driver.values().is_at_rest());
        assert!(scheduler.is_empty());
    }
}
