use super::*;

#[test]
fn default_pose_looks_at_the_grid_center() {
    let pose = CameraPose::default();
    assert_eq!(pose.position, DEFAULT_CAMERA_POSITION);
    assert_eq!(pose.target, Vec3::new(15.0, 0.0, 0.0));
}

#[test]
fn view_direction_is_unit_or_absent() {
    let pose = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    assert_eq!(pose.view_direction(), Some(Vec3::new(0.0, 0.0, -1.0)));
    let degenerate = CameraPose::new(Vec3::ZERO, Vec3::ZERO);
    assert!(degenerate.view_direction().is_none());
}

#[test]
fn poses_blend_both_points() {
    let a = CameraPose::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0));
    let b = CameraPose::new(Vec3::new(4.0, 8.0, 0.0), Vec3::new(10.0, 0.0, 20.0));
    let mid = CameraPose::lerp(&a, &b, 0.25);
    assert_eq!(mid.position, Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(mid.target, Vec3::new(10.0, 0.0, 5.0));
}

#[test]
fn pose_json_shape() {
    let v = serde_json::to_value(CameraPose::default()).unwrap();
    assert_eq!(v["position"]["y"], 20.0);
    assert_eq!(v["target"]["x"], 15.0);
}
