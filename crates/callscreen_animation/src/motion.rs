//! Motion values
//!
//! The eight transform/opacity channels a button choreography can move.
//! Everything the presentation layer needs to pose an animated control is in
//! a [`MotionValues`] snapshot.

use serde::Serialize;
use smallvec::SmallVec;

/// One animatable channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    /// Uniform scale factor
    Scale,
    ScaleX,
    ScaleY,
    /// Glow / shadow intensity, 0..=1
    Glow,
    /// Vertical offset in logical px (negative is up)
    Bounce,
    /// Horizontal offset in logical px
    Shake,
    /// Rotation in degrees
    Rotation,
    Opacity,
}

impl Channel {
    pub const ALL: [Channel; 8] = [
        Channel::Scale,
        Channel::ScaleX,
        Channel::ScaleY,
        Channel::Glow,
        Channel::Bounce,
        Channel::Shake,
        Channel::Rotation,
        Channel::Opacity,
    ];

    /// Value the channel holds when nothing is animating it
    pub const fn rest_value(self) -> f32 {
        match self {
            Channel::Scale | Channel::ScaleX | Channel::ScaleY | Channel::Opacity => 1.0,
            Channel::Glow | Channel::Bounce | Channel::Shake | Channel::Rotation => 0.0,
        }
    }
}

/// A set of channels, small enough to live inline
pub type ChannelSet = SmallVec<[Channel; 4]>;

/// Snapshot of every channel
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MotionValues {
    pub scale: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub glow: f32,
    pub bounce: f32,
    pub shake: f32,
    pub rotation: f32,
    pub opacity: f32,
}

impl MotionValues {
    pub const REST: MotionValues = MotionValues {
        scale: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
        glow: 0.0,
        bounce: 0.0,
        shake: 0.0,
        rotation: 0.0,
        opacity: 1.0,
    };

    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Scale => self.scale,
            Channel::ScaleX => self.scale_x,
            Channel::ScaleY => self.scale_y,
            Channel::Glow => self.glow,
            Channel::Bounce => self.bounce,
            Channel::Shake => self.shake,
            Channel::Rotation => self.rotation,
            Channel::Opacity => self.opacity,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f32) {
        let slot = match channel {
            Channel::Scale => &mut self.scale,
            Channel::ScaleX => &mut self.scale_x,
            Channel::ScaleY => &mut self.scale_y,
            Channel::Glow => &mut self.glow,
            Channel::Bounce => &mut self.bounce,
            Channel::Shake => &mut self.shake,
            Channel::Rotation => &mut self.rotation,
            Channel::Opacity => &mut self.opacity,
        };
        *slot = value;
    }

    pub fn reset(&mut self) {
        *self = Self::REST;
    }

    pub fn reset_channel(&mut self, channel: Channel) {
        self.set(channel, channel.rest_value());
    }

    pub fn is_at_rest(&self) -> bool {
        *self == Self::REST
    }

    /// Copy with every channel outside `channels` held at rest.
    ///
    /// Used when a control only honors part of a choreography (the slider
    /// thumb shows glow but never scales).
    pub fn masked(&self, channels: &[Channel]) -> MotionValues {
        let mut out = Self::REST;
        for &channel in channels {
            out.set(channel, self.get(channel));
        }
        out
    }
}

impl Default for MotionValues {
    fn default() -> Self {
        Self::REST
    }
}
