//! Choreographies
//!
//! A choreography is plain data: an ordered list of [`Step`]s, each either a
//! group of tracks running in parallel or a delay. Tracks move one channel of
//! [`MotionValues`] to a target, either over a fixed duration with an easing
//! curve or with a spring that completes when it comes to rest.
//!
//! [`ChoreographyPlayer`] walks the steps against host-supplied frame deltas.
//! When a cycle ends, every channel the choreography touches is returned to
//! rest before the next cycle starts, so a rotation that ends at 360 degrees
//! begins again from 0.

use smallvec::{smallvec, SmallVec};

use crate::easing::Easing;
use crate::motion::{Channel, ChannelSet, MotionValues};
use crate::spring::{Spring, SpringConfig};

/// Upper bound on how long a spring track may keep its step open
pub const SPRING_MAX_DURATION_MS: f32 = 4000.0;

/// Frame slice used while springs are integrating, in milliseconds
const SPRING_SLICE_MS: f32 = 1000.0 / 120.0;

/// One channel moving to a target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Track {
    Timing {
        channel: Channel,
        to: f32,
        duration_ms: u32,
        easing: Easing,
    },
    Spring {
        channel: Channel,
        to: f32,
        config: SpringConfig,
    },
}

impl Track {
    /// Timed track with the standard ease-in-out curve
    pub fn timing(channel: Channel, to: f32, duration_ms: u32) -> Self {
        Track::Timing {
            channel,
            to,
            duration_ms,
            easing: Easing::STANDARD,
        }
    }

    pub fn eased(channel: Channel, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Track::Timing {
            channel,
            to,
            duration_ms,
            easing,
        }
    }

    pub fn spring(channel: Channel, to: f32, config: SpringConfig) -> Self {
        Track::Spring {
            channel,
            to,
            config,
        }
    }

    pub fn channel(&self) -> Channel {
        match *self {
            Track::Timing { channel, .. } | Track::Spring { channel, .. } => channel,
        }
    }

    pub fn to(&self) -> f32 {
        match *self {
            Track::Timing { to, .. } | Track::Spring { to, .. } => to,
        }
    }
}

/// A unit of a choreography
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Tracks started together; the step ends when the last one does
    Parallel(SmallVec<[Track; 2]>),
    /// Hold all values for a number of milliseconds
    Delay(u32),
}

impl Step {
    /// Longest timed track, ignoring springs
    fn timed_duration_ms(&self) -> f32 {
        match self {
            Step::Parallel(tracks) => tracks
                .iter()
                .map(|t| match t {
                    Track::Timing { duration_ms, .. } => *duration_ms as f32,
                    Track::Spring { .. } => 0.0,
                })
                .fold(0.0, f32::max),
            Step::Delay(ms) => *ms as f32,
        }
    }

    fn has_springs(&self) -> bool {
        matches!(self, Step::Parallel(tracks) if tracks.iter().any(|t| matches!(t, Track::Spring { .. })))
    }
}

/// A declarative, optionally looping sequence of steps
#[derive(Clone, Debug, PartialEq)]
pub struct Choreography {
    steps: Vec<Step>,
    /// Number of cycles (-1 for infinite)
    iterations: i32,
}

impl Choreography {
    /// Empty, infinitely looping choreography
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            iterations: -1,
        }
    }

    /// Single timed track with the standard curve
    pub fn to(self, channel: Channel, to: f32, duration_ms: u32) -> Self {
        self.step(Step::Parallel(smallvec![Track::timing(channel, to, duration_ms)]))
    }

    /// Single timed track with an explicit curve
    pub fn to_eased(self, channel: Channel, to: f32, duration_ms: u32, easing: Easing) -> Self {
        self.step(Step::Parallel(smallvec![Track::eased(
            channel,
            to,
            duration_ms,
            easing
        )]))
    }

    /// Single spring track
    pub fn spring(self, channel: Channel, to: f32, config: SpringConfig) -> Self {
        self.step(Step::Parallel(smallvec![Track::spring(channel, to, config)]))
    }

    /// Several tracks started together
    pub fn parallel<I: IntoIterator<Item = Track>>(self, tracks: I) -> Self {
        self.step(Step::Parallel(tracks.into_iter().collect()))
    }

    pub fn delay(self, ms: u32) -> Self {
        self.step(Step::Delay(ms))
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Set number of cycles (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        self.iterations = count;
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_looping(&self) -> bool {
        self.iterations < 0
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every channel some track in this choreography moves
    pub fn channels(&self) -> ChannelSet {
        let mut out = ChannelSet::new();
        for step in &self.steps {
            if let Step::Parallel(tracks) = step {
                for track in tracks {
                    if !out.contains(&track.channel()) {
                        out.push(track.channel());
                    }
                }
            }
        }
        out
    }

    /// Length of one cycle, counting springs as zero
    pub fn timed_cycle_ms(&self) -> u32 {
        self.steps.iter().map(|s| s.timed_duration_ms() as u32).sum()
    }

    pub fn player(self) -> ChoreographyPlayer {
        ChoreographyPlayer::new(self)
    }
}

impl Default for Choreography {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-track state captured when a step begins
#[derive(Clone, Debug)]
enum ActiveTrack {
    Timing { from: f32 },
    Spring(Spring),
}

/// Plays a [`Choreography`] into a [`MotionValues`]
#[derive(Clone, Debug)]
pub struct ChoreographyPlayer {
    choreography: Choreography,
    channels: ChannelSet,
    step_index: usize,
    step_elapsed_ms: f32,
    active: Option<SmallVec<[ActiveTrack; 2]>>,
    completed_cycles: i32,
    finished: bool,
}

impl ChoreographyPlayer {
    pub fn new(choreography: Choreography) -> Self {
        let channels = choreography.channels();
        let finished = choreography.is_empty() || choreography.iterations == 0;
        Self {
            choreography,
            channels,
            step_index: 0,
            step_elapsed_ms: 0.0,
            active: None,
            completed_cycles: 0,
            finished,
        }
    }

    pub fn choreography(&self) -> &Choreography {
        &self.choreography
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn completed_cycles(&self) -> i32 {
        self.completed_cycles
    }

    /// Channels this player writes
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Advance by `dt_ms` milliseconds, writing into `values`
    pub fn tick(&mut self, dt_ms: f32, values: &mut MotionValues) {
        let mut remaining = dt_ms.max(0.0);
        // Guards against a cycle made only of zero-length steps
        let mut idle_steps = 0usize;

        while !self.finished {
            if self.active.is_none() {
                self.begin_step(values);
            }

            let step = &self.choreography.steps[self.step_index];
            let timed = step.timed_duration_ms();
            let springs = step.has_springs();

            let slice = if self.step_elapsed_ms < timed {
                remaining.min(timed - self.step_elapsed_ms)
            } else if springs {
                remaining.min(SPRING_SLICE_MS)
            } else {
                0.0
            };

            self.step_elapsed_ms += slice;
            remaining -= slice;
            self.apply_active(slice, values);

            if self.step_complete(timed) {
                self.finish_step(values);
                if slice > 0.0 {
                    idle_steps = 0;
                } else {
                    idle_steps += 1;
                    if idle_steps > self.choreography.steps.len() {
                        break;
                    }
                }
                continue;
            }

            if remaining <= 0.0 {
                break;
            }
        }
    }

    fn begin_step(&mut self, values: &MotionValues) {
        let step = &self.choreography.steps[self.step_index];
        let active = match step {
            Step::Parallel(tracks) => tracks
                .iter()
                .map(|track| {
                    let from = values.get(track.channel());
                    match *track {
                        Track::Timing { .. } => ActiveTrack::Timing { from },
                        Track::Spring { to, config, .. } => {
                            let mut spring = Spring::new(config, from);
                            spring.set_target(to);
                            ActiveTrack::Spring(spring)
                        }
                    }
                })
                .collect(),
            Step::Delay(_) => SmallVec::new(),
        };
        self.active = Some(active);
        self.step_elapsed_ms = 0.0;
    }

    fn apply_active(&mut self, slice_ms: f32, values: &mut MotionValues) {
        let (Some(active), Step::Parallel(tracks)) = (
            self.active.as_mut(),
            &self.choreography.steps[self.step_index],
        ) else {
            return;
        };

        for (state, track) in active.iter_mut().zip(tracks.iter()) {
            match (state, *track) {
                (
                    ActiveTrack::Timing { from },
                    Track::Timing {
                        channel,
                        to,
                        duration_ms,
                        easing,
                    },
                ) => {
                    let progress = if duration_ms == 0 {
                        1.0
                    } else {
                        (self.step_elapsed_ms / duration_ms as f32).min(1.0)
                    };
                    let eased = easing.apply(progress);
                    values.set(channel, *from + (to - *from) * eased);
                }
                (ActiveTrack::Spring(spring), Track::Spring { channel, .. }) => {
                    spring.step(slice_ms / 1000.0);
                    values.set(channel, spring.value());
                }
                _ => {}
            }
        }
    }

    fn step_complete(&self, timed: f32) -> bool {
        if self.step_elapsed_ms < timed {
            return false;
        }
        if self.step_elapsed_ms >= timed + SPRING_MAX_DURATION_MS {
            return true;
        }
        self.active.as_ref().map_or(true, |active| {
            active.iter().all(|t| match t {
                ActiveTrack::Spring(spring) => spring.is_settled(),
                ActiveTrack::Timing { .. } => true,
            })
        })
    }

    fn finish_step(&mut self, values: &mut MotionValues) {
        if let Step::Parallel(tracks) = &self.choreography.steps[self.step_index] {
            for track in tracks {
                values.set(track.channel(), track.to());
            }
        }

        self.active = None;
        self.step_elapsed_ms = 0.0;
        self.step_index += 1;

        if self.step_index == self.choreography.steps.len() {
            self.step_index = 0;
            self.completed_cycles += 1;

            let iterations = self.choreography.iterations;
            if iterations >= 0 && self.completed_cycles >= iterations {
                self.finished = true;
                return;
            }

            for &channel in &self.channels {
                values.reset_channel(channel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> Choreography {
        Choreography::new()
            .to(Channel::Scale, 1.2, 100)
            .to(Channel::Scale, 1.0, 100)
    }

    #[test]
    fn timed_track_interpolates() {
        let mut player = Choreography::new()
            .to_eased(Channel::Opacity, 0.0, 100, Easing::Linear)
            .iterations(1)
            .player();
        let mut values = MotionValues::REST;

        player.tick(50.0, &mut values);
        assert!((values.opacity - 0.5).abs() < 1e-4);

        player.tick(50.0, &mut values);
        assert_eq!(values.opacity, 0.0);
        assert!(player.is_finished());
    }

    #[test]
    fn large_tick_crosses_steps() {
        let mut player = pulse().player();
        let mut values = MotionValues::REST;

        // 150ms: first step done, halfway back down
        player.tick(150.0, &mut values);
        assert!(values.scale > 1.0 && values.scale < 1.2);
        assert_eq!(player.completed_cycles(), 0);

        player.tick(50.0, &mut values);
        assert_eq!(player.completed_cycles(), 1);
        assert_eq!(values.scale, 1.0);
    }

    #[test]
    fn delay_holds_values() {
        let mut player = Choreography::new()
            .to(Channel::Bounce, -10.0, 100)
            .delay(500)
            .player();
        let mut values = MotionValues::REST;

        player.tick(100.0, &mut values);
        assert_eq!(values.bounce, -10.0);
        player.tick(300.0, &mut values);
        assert_eq!(values.bounce, -10.0);
    }

    #[test]
    fn cycle_boundary_resets_touched_channels() {
        let mut player = Choreography::new()
            .to_eased(Channel::Rotation, 360.0, 1000, Easing::Linear)
            .player();
        let mut values = MotionValues::REST;

        player.tick(999.0, &mut values);
        assert!(values.rotation > 350.0);

        player.tick(251.0, &mut values);
        assert!((values.rotation - 90.0).abs() < 0.5, "{}", values.rotation);
    }

    #[test]
    fn spring_step_waits_for_rest() {
        let mut player = Choreography::new()
            .to(Channel::Bounce, -12.0, 300)
            .spring(Channel::Bounce, 0.0, SpringConfig::stiff())
            .iterations(1)
            .player();
        let mut values = MotionValues::REST;

        player.tick(300.0, &mut values);
        assert_eq!(values.bounce, -12.0);
        assert!(!player.is_finished());

        for _ in 0..240 {
            player.tick(1000.0 / 60.0, &mut values);
        }
        assert!(player.is_finished());
        assert_eq!(values.bounce, 0.0);
    }

    #[test]
    fn empty_choreography_is_finished() {
        let mut player = Choreography::new().player();
        let mut values = MotionValues::REST;
        player.tick(16.0, &mut values);
        assert!(player.is_finished());
        assert!(values.is_at_rest());
    }

    #[test]
    fn zero_length_cycle_does_not_spin() {
        let mut player = Choreography::new().delay(0).player();
        let mut values = MotionValues::REST;
        player.tick(16.0, &mut values);
        assert!(!player.is_finished());
    }

    #[test]
    fn channels_are_deduplicated() {
        let choreo = Choreography::new()
            .parallel([
                Track::timing(Channel::ScaleX, 1.25, 100),
                Track::timing(Channel::ScaleY, 0.75, 100),
            ])
            .to(Channel::ScaleX, 1.0, 100);
        assert_eq!(choreo.channels().as_slice(), &[Channel::ScaleX, Channel::ScaleY]);
        assert_eq!(choreo.timed_cycle_ms(), 200);
    }
}
