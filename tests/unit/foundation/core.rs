use super::*;

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0).is_err());
    assert_eq!(Fps::new(24).unwrap().get(), 24);
}

#[test]
fn fps_frame_conversions() {
    let fps = Fps::new(30).unwrap();
    assert_eq!(fps.frame_to_secs(FrameIndex(15)), 0.5);
    assert_eq!(fps.secs_to_frames_floor(2.0), 60);
    assert_eq!(fps.secs_to_frames_floor(-1.0), 0);
    assert!((fps.frame_duration_ms() - 33.333_333).abs() < 1e-5);
}

#[test]
fn fps_deserialize_validates() {
    let fps: Fps = serde_json::from_str("60").unwrap();
    assert_eq!(fps.get(), 60);
    assert!(serde_json::from_str::<Fps>("0").is_err());
    assert_eq!(serde_json::to_string(&fps).unwrap(), "60");
}

#[test]
fn vec3_normalized_guards_zero() {
    assert!(Vec3::ZERO.normalized().is_none());
    let n = Vec3::new(0.0, 3.0, 4.0).normalized().unwrap();
    assert!((n.length() - 1.0).abs() < 1e-12);
    assert_eq!(Vec3::new(1.0, 2.0, 3.0) - Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 2.0));
}
