//! Integration tests for the commit controller
//!
//! These tests verify that:
//! - A long enough swipe answers exactly once, and only after the commit run
//! - A short swipe springs back without answering
//! - Haptics fire on grab and commit only
//! - Taps on discrete layouts commit immediately and only once

use callscreen_animation::AnimationKind;
use callscreen_core::{Event, Target};
use callscreen_gesture::{
    Capabilities, CommitController, ControllerConfig, ControllerState, Effect, Effects,
    HapticKind, Intent,
};
use callscreen_theme::{AnswerStyle, AnswerStyleType};
use pretty_assertions::assert_eq;

const FRAME_MS: f32 = 1000.0 / 60.0;

fn controller(kind: AnswerStyleType, haptics: bool, capabilities: Capabilities) -> CommitController {
    let style = AnswerStyle {
        kind,
        animation: AnimationKind::Glow,
        haptic_feedback: haptics,
        ..AnswerStyle::default()
    };
    CommitController::new(&style, ControllerConfig::default(), capabilities)
}

fn slider(haptics: bool) -> CommitController {
    controller(AnswerStyleType::Ios, haptics, Capabilities::default())
}

fn swipe(c: &mut CommitController, distance: f32) -> Vec<Effect> {
    let mut effects = Vec::new();
    effects.extend(c.handle(&Event::pointer_down(Target::SliderThumb)));
    for step in 1..=10 {
        let dx = distance * step as f32 / 10.0;
        effects.extend(c.handle(&Event::pointer_move(Target::SliderThumb, dx, 0.0)));
    }
    effects.extend(c.handle(&Event::pointer_up(Target::SliderThumb, distance, 0.0)));
    effects
}

/// Tick until `elapsed_ms`, returning (time, effect) pairs
fn run(c: &mut CommitController, elapsed_ms: f32) -> Vec<(f32, Effect)> {
    let mut out = Vec::new();
    let mut t = 0.0;
    while t < elapsed_ms {
        t += FRAME_MS;
        let effects: Effects = c.tick(FRAME_MS);
        out.extend(effects.into_iter().map(|e| (t, e)));
    }
    out
}

fn emitted(effects: &[(f32, Effect)]) -> Vec<Intent> {
    effects
        .iter()
        .filter_map(|(_, e)| match e {
            Effect::Emit(intent) => Some(*intent),
            _ => None,
        })
        .collect()
}

#[test]
fn test_long_swipe_answers_once_after_commit_animation() {
    let mut c = slider(true);
    let input_effects = swipe(&mut c, 120.0);
    assert_eq!(input_effects, vec![Effect::Haptic(HapticKind::Tick)]);
    assert_eq!(c.state(), ControllerState::Committing);

    let effects = run(&mut c, 1000.0);
    assert_eq!(emitted(&effects), vec![Intent::Answer]);

    let (at, _) = effects
        .iter()
        .find(|(_, e)| *e == Effect::Emit(Intent::Answer))
        .unwrap();
    assert!(*at >= 200.0 - 0.01, "answered after {at}ms");

    // Confirmation haptic comes right before the intent
    let kinds: Vec<Effect> = effects.iter().map(|(_, e)| *e).collect();
    assert_eq!(
        kinds,
        vec![
            Effect::Haptic(HapticKind::Confirm),
            Effect::Emit(Intent::Answer)
        ]
    );
    assert_eq!(c.state(), ControllerState::Committed(Intent::Answer));
    assert_eq!(c.thumb_offset(), c.layout().slider.unwrap().travel());
}

#[test]
fn test_exact_threshold_commits() {
    let mut c = slider(false);
    swipe(&mut c, 100.0);
    assert_eq!(c.state(), ControllerState::Committing);
}

#[test]
fn test_short_swipe_springs_back_without_answering() {
    let mut c = slider(true);
    let input_effects = swipe(&mut c, 99.0);
    assert_eq!(input_effects, vec![Effect::Haptic(HapticKind::Tick)]);
    assert_eq!(c.state(), ControllerState::SnapBack);

    let effects = run(&mut c, 5000.0);
    assert!(effects.is_empty(), "{effects:?}");
    assert_eq!(c.thumb_offset(), 0.0);
    assert_eq!(c.state(), ControllerState::Idle);
    assert!(c.committed().is_none());
}

#[test]
fn test_input_during_commit_is_ignored() {
    let mut c = slider(true);
    swipe(&mut c, 200.0);
    c.tick(50.0);

    assert!(c.handle(&Event::pointer_down(Target::SliderThumb)).is_empty());
    assert!(c.handle(&Event::tap(Target::DeclineButton)).is_empty());
    assert_eq!(c.state(), ControllerState::Committing);

    let effects = run(&mut c, 500.0);
    assert_eq!(emitted(&effects), vec![Intent::Answer]);
}

#[test]
fn test_regrab_during_snap_back_starts_from_current_offset() {
    let mut c = slider(false);
    swipe(&mut c, 80.0);
    c.tick(FRAME_MS);
    c.tick(FRAME_MS);
    let caught_at = c.thumb_offset();
    assert!(caught_at > 0.0 && caught_at < 80.0);

    c.handle(&Event::pointer_down(Target::SliderThumb));
    assert_eq!(c.state(), ControllerState::Dragging);
    c.handle(&Event::pointer_move(Target::SliderThumb, 10.0, 0.0));
    assert!((c.thumb_offset() - (caught_at + 10.0)).abs() < 1e-3);

    // Spring no longer pulls the thumb
    c.tick(100.0);
    assert!((c.thumb_offset() - (caught_at + 10.0)).abs() < 1e-3);
}

#[test]
fn test_decline_beside_slider_works_mid_drag() {
    let mut c = slider(true);
    c.handle(&Event::pointer_down(Target::SliderThumb));
    c.handle(&Event::pointer_move(Target::SliderThumb, 60.0, 0.0));

    let effects = c.handle(&Event::tap(Target::DeclineButton));
    assert_eq!(effects.as_slice(), &[Effect::Emit(Intent::Decline)]);
    assert_eq!(c.state(), ControllerState::Committed(Intent::Decline));

    assert!(c.handle(&Event::pointer_up(Target::SliderThumb, 200.0, 0.0)).is_empty());
    assert!(emitted(&run(&mut c, 1000.0)).is_empty());
}

#[test]
fn test_slider_has_no_answer_button() {
    let mut c = slider(true);
    assert!(c.handle(&Event::tap(Target::AnswerButton)).is_empty());
    assert_eq!(c.state(), ControllerState::Idle);
}

#[test]
fn test_android_tap_vibrates_then_commits() {
    let mut c = controller(AnswerStyleType::Android, true, Capabilities::default());
    let effects = c.handle(&Event::tap(Target::AnswerButton));
    assert_eq!(
        effects.as_slice(),
        &[
            Effect::Haptic(HapticKind::Tick),
            Effect::Emit(Intent::Answer)
        ]
    );

    assert!(c.handle(&Event::tap(Target::AnswerButton)).is_empty());
    assert!(c.handle(&Event::tap(Target::DeclineButton)).is_empty());
}

#[test]
fn test_classic_behaves_like_android() {
    let caps = Capabilities {
        message: true,
        reminder: false,
    };
    let mut c = controller(AnswerStyleType::Classic, false, caps);
    assert!(c.handle(&Event::tap(Target::ReminderButton)).is_empty());
    assert_eq!(
        c.handle(&Event::tap(Target::MessageButton)).as_slice(),
        &[Effect::Emit(Intent::Message)]
    );
}

#[test]
fn test_floating_and_minimal_taps_have_no_haptics() {
    for kind in [AnswerStyleType::Floating, AnswerStyleType::Minimal] {
        let mut c = controller(kind, true, Capabilities::default());
        assert_eq!(
            c.handle(&Event::tap(Target::DeclineButton)).as_slice(),
            &[Effect::Emit(Intent::Decline)],
            "{kind:?}"
        );
    }
}

#[test]
fn test_secondary_controls_absent_outside_button_row() {
    let caps = Capabilities {
        message: true,
        reminder: true,
    };
    for kind in [AnswerStyleType::Ios, AnswerStyleType::Floating, AnswerStyleType::Minimal] {
        let mut c = controller(kind, false, caps);
        assert!(c.handle(&Event::tap(Target::MessageButton)).is_empty(), "{kind:?}");
        assert!(c.handle(&Event::tap(Target::ReminderButton)).is_empty(), "{kind:?}");
    }
}

#[test]
fn test_short_track_still_commits_at_far_rail() {
    let style = AnswerStyle {
        kind: AnswerStyleType::Ios,
        ..AnswerStyle::default()
    };
    let config = ControllerConfig {
        track_width: 120.0,
        ..ControllerConfig::default()
    };
    let mut c = CommitController::new(&style, config, Capabilities::default());
    swipe(&mut c, 500.0);
    assert_eq!(c.state(), ControllerState::Committing);
}
