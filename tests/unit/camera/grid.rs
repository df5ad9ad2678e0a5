use super::*;

#[test]
fn auto_rotate_accumulates_per_axis() {
    let mut g = GridTransform::at(Vec3::new(15.0, 0.0, 0.0));
    for _ in 0..4 {
        g.auto_rotate(false, true, AUTO_ROTATE_SPEED);
    }
    assert_eq!(g.rotation_x, 0.0);
    assert!((g.rotation_y - 0.02).abs() < 1e-12);
    g.reset_rotation();
    assert_eq!((g.rotation_x, g.rotation_y), (0.0, 0.0));
    assert_eq!(g.translation, Vec3::new(15.0, 0.0, 0.0));
}

#[test]
fn apply_rotates_then_translates() {
    let g = GridTransform {
        translation: Vec3::new(1.0, 0.0, 0.0),
        rotation_x: 0.0,
        rotation_y: std::f64::consts::FRAC_PI_2,
    };
    let p = g.apply(Vec3::new(1.0, 0.0, 0.0));
    assert!((p.x - 1.0).abs() < 1e-12);
    assert!((p.z + 1.0).abs() < 1e-12);
}
