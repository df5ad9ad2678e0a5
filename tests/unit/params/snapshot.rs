use super::*;

#[test]
fn defaults_match_the_stock_scene() {
    let p = FieldParams::default();
    assert_eq!(p.base_amplitude, 1.6);
    assert_eq!(p.wave_count, 6);
    assert_eq!(p.max_height_bound, 50);
    assert_eq!(p.grid_offset_x, 15);
    assert_eq!(p.fov, 75);
    assert_eq!(p.grid_center(), Vec3::new(15.0, 0.0, 0.0));
}

#[test]
fn set_clamps_and_reports_the_stored_value() {
    let mut p = FieldParams::default();
    assert_eq!(p.set(ParamKey::WaveCount, 20.0), 8.0);
    assert_eq!(p.wave_count, 8);
    assert_eq!(p.set(ParamKey::GridRepetitions, 2.6), 3.0);
    assert_eq!(p.grid_repetitions, 3);
    assert_eq!(p.set(ParamKey::VideoImpact, f64::NAN), 0.0);
    assert_eq!(p.set(ParamKey::WaveDensity, 0.0), 0.005);
}

#[test]
fn sanitize_pulls_everything_into_range() {
    let mut p = FieldParams {
        base_amplitude: 9.0,
        wave_count: 0,
        fov: 500,
        cam_shake: -3.0,
        ..FieldParams::default()
    };
    p.sanitize();
    assert_eq!(p.base_amplitude, 2.0);
    assert_eq!(p.wave_count, 1);
    assert_eq!(p.fov, 120);
    assert_eq!(p.cam_shake, 0.0);
}

#[test]
fn partial_json_takes_defaults_and_rounds_integers() {
    let p: FieldParams =
        serde_json::from_str(r#"{"baseAmplitude": 1.0, "fov": 60.6, "colorProfile": 2}"#).unwrap();
    assert_eq!(p.base_amplitude, 1.0);
    assert_eq!(p.fov, 61);
    assert_eq!(p.color_profile, ProfileSelection::Profile(2));
    assert_eq!(p.wave_count, 6);
}

#[test]
fn json_uses_camel_case_names() {
    let v = serde_json::to_value(FieldParams::default()).unwrap();
    assert_eq!(v["maxHeightBound"], 50);
    assert_eq!(v["invertVideo"], false);
    assert_eq!(v["colorProfile"], 0);
}

#[test]
fn interpolate_blends_by_field_kind() {
    let a = FieldParams {
        base_amplitude: 1.0,
        wave_count: 2,
        invert_video: false,
        color_profile: ProfileSelection::Profile(0),
        ..FieldParams::default()
    };
    let b = FieldParams {
        base_amplitude: 3.0,
        wave_count: 5,
        invert_video: true,
        color_profile: ProfileSelection::Profile(4),
        ..FieldParams::default()
    };
    let mid = FieldParams::interpolate(&a, &b, 0.5, FlagBlend::Midpoint);
    assert_eq!(mid.base_amplitude, 2.0);
    assert_eq!(mid.wave_count, 4);
    assert!(mid.invert_video);
    assert_eq!(mid.color_profile, ProfileSelection::Profile(2));

    let early = FieldParams::interpolate(&a, &b, 0.25, FlagBlend::Midpoint);
    assert!(!early.invert_video);
    let held = FieldParams::interpolate(&a, &b, 0.75, FlagBlend::HoldPrevious);
    assert!(!held.invert_video);
}

#[test]
fn synthesis_view_never_goes_negative() {
    let p = FieldParams {
        wave_count: -3,
        max_height_bound: -10,
        ..FieldParams::default()
    };
    let cfg = p.synthesis();
    assert_eq!(cfg.wave_count, 0);
    assert_eq!(cfg.max_height_bound, 0.0);
}
