use super::*;
use crate::camera::pose::CameraPose;
use crate::foundation::core::Fps;
use crate::params::snapshot::FieldParams;
use crate::timeline::keyframe::Keyframe;

// 20 fps over 1 s: 20 frames of exactly 50 ms.
fn timeline(looping: bool) -> Timeline {
    let mut tl = Timeline::new(Fps::new(20).unwrap(), 1.0).unwrap();
    tl.set_looping(looping);
    tl.insert(Keyframe::new(
        KeyframeId(1),
        0.0,
        CameraPose::default(),
        FieldParams {
            base_amplitude: 0.0,
            ..FieldParams::default()
        },
    ))
    .unwrap();
    tl.insert(Keyframe::new(
        KeyframeId(2),
        1.0,
        CameraPose::default(),
        FieldParams {
            base_amplitude: 2.0,
            ..FieldParams::default()
        },
    ))
    .unwrap();
    tl
}

#[test]
fn paused_scheduler_does_not_advance() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    let adv = s.advance(&tl, 500.0);
    assert_eq!(adv, Advance::default());
    assert_eq!(s.current_frame(), FrameIndex(0));
    assert_eq!(s.state().frame_accumulator, 0.0);
}

#[test]
fn accumulator_carries_sub_frame_time() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.play();
    let adv = s.advance(&tl, 30.0);
    assert_eq!(adv.frames_advanced, 0);
    assert_eq!(s.current_frame(), FrameIndex(0));
    assert!(adv.sample.is_some());

    let adv = s.advance(&tl, 30.0);
    assert_eq!(adv.frames_advanced, 1);
    assert_eq!(s.current_frame(), FrameIndex(1));
    assert!((s.state().frame_accumulator - 10.0).abs() < 1e-9);
}

#[test]
fn slow_tick_catches_up_several_frames() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.play();
    let adv = s.advance(&tl, 175.0);
    assert_eq!(adv.frames_advanced, 3);
    assert_eq!(s.current_frame(), FrameIndex(3));
    let sample = adv.sample.unwrap();
    assert!((sample.params.base_amplitude - 0.3).abs() < 1e-12);
}

#[test]
fn non_looping_end_stops_on_last_frame() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.scrub(&tl, 18);
    s.play();
    let adv = s.advance(&tl, 200.0);
    assert!(adv.finished);
    assert!(!adv.wrapped);
    assert!(!s.is_playing());
    assert_eq!(s.current_frame(), FrameIndex(19));
}

#[test]
fn looping_wraps_and_keeps_the_remainder() {
    let tl = timeline(true);
    let mut s = PlaybackScheduler::new();
    s.scrub(&tl, 19);
    s.play();
    let adv = s.advance(&tl, 120.0);
    assert!(adv.wrapped);
    assert!(s.is_playing());
    assert_eq!(s.current_frame(), FrameIndex(1));
    assert!((s.state().frame_accumulator - 20.0).abs() < 1e-9);
}

#[test]
fn scrub_clamps_and_keeps_play_state() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.scrub(&tl, 500);
    assert_eq!(s.current_frame(), FrameIndex(19));
    s.scrub(&tl, -4);
    assert_eq!(s.current_frame(), FrameIndex(0));
    s.play();
    s.scrub(&tl, 10);
    assert!(s.is_playing());
}

#[test]
fn repeated_scrubs_are_idempotent() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    let end = s.jump_end(&tl);
    let start = s.jump_start(&tl);
    assert_eq!(s.jump_end(&tl), end);
    assert_eq!(s.jump_start(&tl), start);
    assert_eq!(start.unwrap().params.base_amplitude, 0.0);
}

#[test]
fn scrub_by_fraction() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.scrub_to_fraction(&tl, 0.5);
    assert_eq!(s.current_frame(), FrameIndex(10));
    s.scrub_to_fraction(&tl, 1.0);
    assert_eq!(s.current_frame(), FrameIndex(19));
    s.scrub_to_fraction(&tl, f64::NAN);
    assert_eq!(s.current_frame(), FrameIndex(0));
}

#[test]
fn stop_rewinds_and_clears_the_accumulator() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.play();
    s.advance(&tl, 130.0);
    s.stop();
    assert_eq!(s.state().current_frame, FrameIndex(0));
    assert_eq!(s.state().frame_accumulator, 0.0);
    assert!(!s.is_playing());
}

#[test]
fn controls_lock_only_while_playing() {
    let mut s = PlaybackScheduler::new();
    assert!(s.camera_controls_enabled());
    s.toggle();
    assert!(!s.camera_controls_enabled());
    s.set_lock_controls(false);
    assert!(s.camera_controls_enabled());
    s.toggle();
    assert!(!s.is_playing());
}

#[test]
fn status_line_format() {
    let tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.scrub(&tl, 5);
    assert_eq!(s.status_line(&tl), "Frame: 5 / 20 | Time: 0.25s / 1.00s");
}

#[test]
fn shrinking_the_timeline_clamps_the_frame() {
    let mut tl = timeline(false);
    let mut s = PlaybackScheduler::new();
    s.scrub(&tl, 19);
    tl.set_duration(0.5).unwrap();
    s.clamp_to(&tl);
    assert_eq!(s.current_frame(), FrameIndex(9));
}
