use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::Vec3;

fn kf(id: u64, time: f64, base_amplitude: f64) -> Keyframe {
    Keyframe::new(
        KeyframeId(id),
        time,
        CameraPose::new(Vec3::new(time * 10.0, 0.0, 0.0), Vec3::ZERO),
        FieldParams {
            base_amplitude,
            ..FieldParams::default()
        },
    )
}

fn two_second_timeline() -> Timeline {
    let mut tl = Timeline::new(Fps::new(30).unwrap(), 2.0).unwrap();
    tl.insert(kf(1, 0.0, 1.0)).unwrap();
    tl.insert(kf(2, 1.0, 3.0)).unwrap();
    tl
}

#[test]
fn linear_midpoint_is_exact() {
    let tl = two_second_timeline();
    let s = tl.evaluate(0.5).unwrap();
    assert_eq!(s.params.base_amplitude, 2.0);
    assert_eq!(s.camera.position, Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn ease_in_out_uses_the_left_keyframe() {
    let mut tl = Timeline::default();
    tl.insert(kf(1, 0.0, 0.0).with_easing(Ease::EaseInOut)).unwrap();
    tl.insert(kf(2, 1.0, 2.0)).unwrap();
    let s = tl.evaluate(0.25).unwrap();
    let eased = 0.25 * 0.25 * (3.0 - 2.0 * 0.25);
    assert!((s.params.base_amplitude - 2.0 * eased).abs() < 1e-12);
}

#[test]
fn edges_hold_the_nearest_keyframe() {
    let mut tl = Timeline::default();
    tl.insert(kf(1, 2.0, 0.5)).unwrap();
    tl.insert(kf(2, 4.0, 1.5)).unwrap();
    assert_eq!(tl.evaluate(0.0).unwrap(), tl.keyframes()[0].sample());
    assert_eq!(tl.evaluate(9.0).unwrap(), tl.keyframes()[1].sample());
    assert_eq!(tl.evaluate(4.0).unwrap(), tl.keyframes()[1].sample());
    assert_eq!(tl.evaluate(2.0).unwrap(), tl.keyframes()[0].sample());
}

#[test]
fn empty_timeline_evaluates_to_nothing() {
    assert!(Timeline::default().evaluate(1.0).is_none());
}

#[test]
fn duplicate_times_use_the_later_keyframe_without_nan() {
    let mut tl = Timeline::default();
    tl.insert(kf(1, 1.0, 0.5)).unwrap();
    tl.insert(kf(2, 1.0, 1.5)).unwrap();
    let s = tl.evaluate(1.0).unwrap();
    assert_eq!(s.params.base_amplitude, 1.5);
}

#[test]
fn flags_switch_at_the_midpoint_by_default() {
    let mut a = kf(1, 0.0, 1.0);
    a.parameters.auto_rotate_y = false;
    let mut b = kf(2, 1.0, 1.0);
    b.parameters.auto_rotate_y = true;
    let mut tl = Timeline::default();
    tl.insert(a).unwrap();
    tl.insert(b).unwrap();
    assert!(!tl.evaluate(0.49).unwrap().params.auto_rotate_y);
    assert!(tl.evaluate(0.5).unwrap().params.auto_rotate_y);
    assert!(
        !tl.evaluate_with(0.9, FlagBlend::HoldPrevious)
            .unwrap()
            .params
            .auto_rotate_y
    );
}

#[test]
fn insert_keeps_order_and_rejects_duplicates() {
    let mut tl = Timeline::default();
    tl.insert(kf(3, 2.0, 1.0)).unwrap();
    tl.insert(kf(1, 0.5, 1.0)).unwrap();
    tl.insert(kf(2, 2.0, 1.0)).unwrap();
    let ids: Vec<_> = tl.keyframes().iter().map(|k| k.id.0).collect();
    assert_eq!(ids, [1, 3, 2]);
    assert!(matches!(
        tl.insert(kf(3, 5.0, 1.0)),
        Err(FieldError::Invariant(_))
    ));
    assert!(matches!(
        tl.insert(kf(9, -1.0, 1.0)),
        Err(FieldError::Validation(_))
    ));
    assert_eq!(tl.keyframes().len(), 3);
}

#[test]
fn update_resorts_and_rejects_bad_edits() {
    let mut tl = two_second_timeline();
    tl.update(KeyframeId(1), |k| k.time_seconds = 1.5).unwrap();
    let ids: Vec<_> = tl.keyframes().iter().map(|k| k.id.0).collect();
    assert_eq!(ids, [2, 1]);

    assert!(tl.update(KeyframeId(1), |k| k.time_seconds = f64::NAN).is_err());
    assert_eq!(tl.get(KeyframeId(1)).unwrap().time_seconds, 1.5);
    assert!(tl.update(KeyframeId(1), |k| k.id = KeyframeId(2)).is_err());
    assert!(tl.update(KeyframeId(7), |_| {}).is_err());
}

#[test]
fn remove_unknown_id_fails() {
    let mut tl = two_second_timeline();
    assert_eq!(tl.remove(KeyframeId(2)).unwrap().id, KeyframeId(2));
    assert!(matches!(tl.remove(KeyframeId(2)), Err(FieldError::Invariant(_))));
}

#[test]
fn allocated_ids_are_unique_and_monotonic() {
    let tl = two_second_timeline();
    assert_eq!(tl.allocate_id(1_700_000_000_000), KeyframeId(1_700_000_000_000));
    assert_eq!(tl.allocate_id(0), KeyframeId(3));
}

#[test]
fn frame_math() {
    let mut tl = two_second_timeline();
    assert_eq!(tl.total_frames(), 60);
    assert_eq!(tl.last_frame(), FrameIndex(59));
    assert_eq!(tl.frame_time(FrameIndex(15)), 0.5);
    tl.set_duration(0.01).unwrap();
    assert_eq!(tl.total_frames(), 0);
    assert_eq!(tl.last_frame(), FrameIndex(0));
    assert!(tl.set_duration(0.0).is_err());
    assert!(tl.set_fps(0).is_err());
    assert_eq!(tl.fps().get(), 30);
}

#[test]
fn from_parts_checks_ids_and_sorts() {
    let err = Timeline::from_parts(Fps::default(), 5.0, false, vec![kf(1, 0.0, 1.0), kf(1, 1.0, 1.0)])
        .unwrap_err();
    assert!(matches!(err, FieldError::Invariant(_)));

    let tl = Timeline::from_parts(Fps::default(), 5.0, true, vec![kf(1, 3.0, 1.0), kf(2, 1.0, 1.0)])
        .unwrap();
    assert_eq!(tl.keyframes()[0].id, KeyframeId(2));
    assert!(tl.looping());
}
