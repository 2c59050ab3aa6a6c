//! Animation presets
//!
//! The fifteen answer-button animations a theme can name, the choreography
//! each one plays, and the slow ambient loops used behind the caller.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::choreography::{Choreography, Track};
use crate::easing::Easing;
use crate::motion::{Channel, ChannelSet};
use crate::spring::SpringConfig;

/// Named button animation
///
/// Unknown names in theme files deserialize to [`AnimationKind::None`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    Pulse,
    Glow,
    Bounce,
    Shake,
    Ripple,
    Rotate,
    Swing,
    Heartbeat,
    Jello,
    RubberBand,
    Tada,
    Wobble,
    Flash,
    FadeInOut,
    #[default]
    #[serde(other)]
    None,
}

impl AnimationKind {
    /// Stable id as written in theme files
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pulse => "pulse",
            Self::Glow => "glow",
            Self::Bounce => "bounce",
            Self::Shake => "shake",
            Self::Ripple => "ripple",
            Self::Rotate => "rotate",
            Self::Swing => "swing",
            Self::Heartbeat => "heartbeat",
            Self::Jello => "jello",
            Self::RubberBand => "rubberBand",
            Self::Tada => "tada",
            Self::Wobble => "wobble",
            Self::Flash => "flash",
            Self::FadeInOut => "fadeInOut",
        }
    }

    pub fn all() -> &'static [AnimationKind] {
        const KINDS: [AnimationKind; 15] = [
            AnimationKind::None,
            AnimationKind::Pulse,
            AnimationKind::Glow,
            AnimationKind::Bounce,
            AnimationKind::Shake,
            AnimationKind::Ripple,
            AnimationKind::Rotate,
            AnimationKind::Swing,
            AnimationKind::Heartbeat,
            AnimationKind::Jello,
            AnimationKind::RubberBand,
            AnimationKind::Tada,
            AnimationKind::Wobble,
            AnimationKind::Flash,
            AnimationKind::FadeInOut,
        ];
        &KINDS
    }

    /// Look up by id, falling back to `None` for anything unknown
    pub fn from_id(id: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.id() == id)
            .unwrap_or_default()
    }

    /// The looping choreography for this kind. `None` is empty.
    pub fn choreography(self) -> Choreography {
        use Channel::*;

        let c = Choreography::new();
        match self {
            Self::None => c,
            Self::Pulse => c.to(Scale, 1.15, 600).to(Scale, 1.0, 600),
            Self::Glow => c.to(Glow, 1.0, 1000).to(Glow, 0.0, 1000),
            Self::Bounce => c
                .to(Bounce, -12.0, 300)
                .spring(Bounce, 0.0, SpringConfig::from_tension_friction(100.0, 3.0))
                .delay(500),
            Self::Shake => c
                .to(Shake, 4.0, 50)
                .to(Shake, -4.0, 50)
                .to(Shake, 3.0, 50)
                .to(Shake, -3.0, 50)
                .to(Shake, 0.0, 50)
                .delay(1000),
            Self::Ripple => c
                .parallel([
                    Track::timing(Scale, 1.15, 500),
                    Track::timing(Glow, 1.0, 500),
                ])
                .parallel([Track::timing(Scale, 1.0, 500), Track::timing(Glow, 0.0, 500)]),
            Self::Rotate => c.to_eased(Rotation, 360.0, 3000, Easing::Linear),
            Self::Swing => c
                .to(Rotation, 18.0, 300)
                .to(Rotation, -18.0, 600)
                .to(Rotation, 10.8, 400)
                .to(Rotation, -10.8, 400)
                .to(Rotation, 0.0, 200)
                .delay(500),
            Self::Heartbeat => c
                .to(Scale, 1.2, 100)
                .to(Scale, 1.0, 100)
                .to(Scale, 1.15, 100)
                .to(Scale, 1.0, 100)
                .delay(800),
            Self::Jello => c
                .parallel([Track::timing(ScaleX, 1.25, 100), Track::timing(ScaleY, 0.75, 100)])
                .parallel([Track::timing(ScaleX, 0.75, 100), Track::timing(ScaleY, 1.25, 100)])
                .parallel([Track::timing(ScaleX, 1.15, 100), Track::timing(ScaleY, 0.85, 100)])
                .parallel([
                    Track::spring(ScaleX, 1.0, SpringConfig::default()),
                    Track::spring(ScaleY, 1.0, SpringConfig::default()),
                ])
                .delay(1000),
            Self::RubberBand => c
                .to(ScaleX, 1.25, 200)
                .to(ScaleX, 0.75, 100)
                .to(ScaleX, 1.15, 100)
                .spring(ScaleX, 1.0, SpringConfig::default())
                .delay(1200),
            Self::Tada => c
                .parallel([Track::timing(Scale, 0.9, 100), Track::timing(Rotation, -18.0, 100)])
                .parallel([Track::timing(Scale, 1.1, 100), Track::timing(Rotation, 18.0, 100)])
                .to(Rotation, -18.0, 100)
                .to(Rotation, 18.0, 100)
                .to(Rotation, -10.8, 100)
                .parallel([Track::timing(Scale, 1.0, 100), Track::timing(Rotation, 0.0, 100)])
                .delay(1500),
            Self::Wobble => c
                .parallel([Track::timing(Shake, -25.0, 150), Track::timing(Rotation, -7.2, 150)])
                .parallel([Track::timing(Shake, 20.0, 150), Track::timing(Rotation, 7.2, 150)])
                .parallel([Track::timing(Shake, -15.0, 150), Track::timing(Rotation, -3.6, 150)])
                .parallel([Track::timing(Shake, 10.0, 150), Track::timing(Rotation, 3.6, 150)])
                .parallel([Track::timing(Shake, 0.0, 150), Track::timing(Rotation, 0.0, 150)])
                .delay(1500),
            Self::Flash => c
                .to(Opacity, 0.3, 200)
                .to(Opacity, 1.0, 200)
                .to(Opacity, 0.3, 200)
                .to(Opacity, 1.0, 200)
                .delay(800),
            Self::FadeInOut => c.to(Opacity, 0.5, 1000).to(Opacity, 1.0, 1000),
        }
    }
}

impl Display for AnimationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Where an answer-button animation is being shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    /// Thumb of the swipe-to-answer slider
    SliderThumb,
    /// Answer button in the row of round buttons
    ButtonRow,
    /// Large floating answer button
    Floating,
    /// Outlined minimal buttons
    Minimal,
}

/// Which channels of a kind's choreography each surface actually renders
pub struct KindApplicability;

impl KindApplicability {
    /// Channels `surface` honors while `kind` is playing. Everything else is
    /// shown at rest.
    pub fn channels(surface: Surface, kind: AnimationKind) -> ChannelSet {
        let mut out = ChannelSet::new();
        match surface {
            Surface::SliderThumb => {
                if kind == AnimationKind::Glow {
                    out.push(Channel::Glow);
                }
            }
            Surface::ButtonRow => match kind {
                AnimationKind::Pulse => out.push(Channel::Scale),
                AnimationKind::Bounce => out.push(Channel::Bounce),
                _ => {}
            },
            Surface::Floating => {
                out.push(Channel::Scale);
                if kind == AnimationKind::Glow {
                    out.push(Channel::Glow);
                }
            }
            Surface::Minimal => {}
        }
        out
    }
}

/// Slow loops played on the call background
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMotion {
    /// Scale up to 1.1 and back, 15s each way
    SlowZoom,
    /// Drift 50px left and back, 20s each way
    Pan,
    /// Scale to 1.02 and back, 2s each way
    Pulse,
    #[default]
    #[serde(other)]
    None,
}

impl BackgroundMotion {
    pub fn choreography(self) -> Choreography {
        let c = Choreography::new();
        match self {
            Self::None => c,
            Self::SlowZoom => c
                .to(Channel::Scale, 1.1, 15_000)
                .to(Channel::Scale, 1.0, 15_000),
            Self::Pan => c
                .to(Channel::Shake, -50.0, 20_000)
                .to(Channel::Shake, 0.0, 20_000),
            Self::Pulse => c
                .to(Channel::Scale, 1.02, 2000)
                .to(Channel::Scale, 1.0, 2000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::Step;

    #[test]
    fn every_kind_but_none_has_steps() {
        for kind in AnimationKind::all() {
            let choreo = kind.choreography();
            assert_eq!(choreo.is_empty(), *kind == AnimationKind::None, "{kind}");
            assert!(choreo.is_looping());
        }
    }

    #[test]
    fn ids_round_trip_through_lookup() {
        for kind in AnimationKind::all() {
            assert_eq!(AnimationKind::from_id(kind.id()), *kind);
        }
        assert_eq!(AnimationKind::from_id("sparkle"), AnimationKind::None);
    }

    #[test]
    fn serde_uses_theme_file_names() {
        let json = serde_json::to_string(&AnimationKind::RubberBand).unwrap();
        assert_eq!(json, "\"rubberBand\"");
        let kind: AnimationKind = serde_json::from_str("\"fadeInOut\"").unwrap();
        assert_eq!(kind, AnimationKind::FadeInOut);
        let kind: AnimationKind = serde_json::from_str("\"confetti\"").unwrap();
        assert_eq!(kind, AnimationKind::None);
    }

    #[test]
    fn shake_cycle_is_five_beats_then_a_pause() {
        let choreo = AnimationKind::Shake.choreography();
        assert_eq!(choreo.steps().len(), 6);
        assert_eq!(choreo.steps()[5], Step::Delay(1000));
        assert_eq!(choreo.timed_cycle_ms(), 1250);
    }

    #[test]
    fn rotation_amplitudes_are_degrees() {
        let choreo = AnimationKind::Swing.choreography();
        let Step::Parallel(tracks) = &choreo.steps()[0] else {
            panic!("expected a track step");
        };
        assert_eq!(tracks[0].to(), 18.0);
    }

    #[test]
    fn slider_only_shows_glow() {
        assert_eq!(
            KindApplicability::channels(Surface::SliderThumb, AnimationKind::Glow).as_slice(),
            &[Channel::Glow]
        );
        assert!(KindApplicability::channels(Surface::SliderThumb, AnimationKind::Pulse).is_empty());
    }

    #[test]
    fn button_row_shows_pulse_and_bounce() {
        assert_eq!(
            KindApplicability::channels(Surface::ButtonRow, AnimationKind::Pulse).as_slice(),
            &[Channel::Scale]
        );
        assert_eq!(
            KindApplicability::channels(Surface::ButtonRow, AnimationKind::Bounce).as_slice(),
            &[Channel::Bounce]
        );
        assert!(KindApplicability::channels(Surface::ButtonRow, AnimationKind::Shake).is_empty());
    }

    #[test]
    fn minimal_shows_nothing() {
        for kind in AnimationKind::all() {
            assert!(KindApplicability::channels(Surface::Minimal, *kind).is_empty());
        }
    }

    #[test]
    fn background_motion_names() {
        let m: BackgroundMotion = serde_json::from_str("\"slow-zoom\"").unwrap();
        assert_eq!(m, BackgroundMotion::SlowZoom);
        assert_eq!(BackgroundMotion::Pan.choreography().timed_cycle_ms(), 40_000);
    }
}
