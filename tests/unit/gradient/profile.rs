use super::*;

fn bw() -> Vec<ColorStop> {
    vec![
        ColorStop::new(0.0, Rgb::BLACK),
        ColorStop::new(1.0, Rgb::WHITE),
    ]
}

#[test]
fn endpoints_return_edge_colors_exactly() {
    for p in builtin_profiles() {
        let stops = p.stops();
        assert_eq!(p.color_at(0.0), stops[0].color, "{}", p.name());
        assert_eq!(p.color_at(1.0), stops[stops.len() - 1].color, "{}", p.name());
    }
}

#[test]
fn quarter_of_black_to_white_is_quarter_gray() {
    assert_eq!(sample_stops(&bw(), 0.25), Rgb::new(0.25, 0.25, 0.25));
}

#[test]
fn interior_samples_are_convex_combinations() {
    let a = Rgb::from_hex(0x0066aa);
    let b = Rgb::from_hex(0x00aaff);
    let stops = [ColorStop::new(0.3, a), ColorStop::new(0.6, b)];
    let mut prev = a;
    for k in 1..30 {
        let t = 0.3 + 0.3 * (k as f64) / 30.0;
        let c = sample_stops(&stops, t);
        for (lo, hi, v, p) in [(a.r, b.r, c.r, prev.r), (a.g, b.g, c.g, prev.g), (a.b, b.b, c.b, prev.b)] {
            assert!(v >= lo.min(hi) - 1e-12 && v <= lo.max(hi) + 1e-12);
            if hi >= lo {
                assert!(v >= p - 1e-12);
            } else {
                assert!(v <= p + 1e-12);
            }
        }
        prev = c;
    }
}

#[test]
fn degenerate_lists() {
    assert_eq!(sample_stops(&[], 0.3), Rgb::WHITE);
    let red = Rgb::new(1.0, 0.0, 0.0);
    assert_eq!(sample_stops(&[ColorStop::new(0.5, red)], 0.9), red);
}

#[test]
fn out_of_range_and_nan_inputs_clamp() {
    assert_eq!(sample_stops(&bw(), -3.0), Rgb::BLACK);
    assert_eq!(sample_stops(&bw(), 7.0), Rgb::WHITE);
    assert_eq!(sample_stops(&bw(), f64::NAN), Rgb::BLACK);
}

#[test]
fn edges_hold_before_first_and_after_last_stop() {
    let stops = [
        ColorStop::new(0.2, Rgb::BLACK),
        ColorStop::new(0.8, Rgb::WHITE),
    ];
    assert_eq!(sample_stops(&stops, 0.1), Rgb::BLACK);
    assert_eq!(sample_stops(&stops, 0.9), Rgb::WHITE);
    assert_eq!(sample_stops(&stops, 0.5), Rgb::new(0.5, 0.5, 0.5));
}

#[test]
fn new_sorts_and_rejects_empty() {
    let p = GradientProfile::new(
        "rev",
        vec![ColorStop::new(1.0, Rgb::WHITE), ColorStop::new(0.0, Rgb::BLACK)],
    )
    .unwrap();
    assert_eq!(p.stops()[0].position, 0.0);
    assert!(GradientProfile::new("empty", vec![]).is_err());
    assert!(GradientProfile::new("nan", vec![ColorStop::new(f64::NAN, Rgb::BLACK)]).is_err());
}

#[test]
fn deserialize_validates_and_sorts() {
    let p: GradientProfile = serde_json::from_str(
        r##"{"name":"x","stops":[{"position":1,"color":"#ffffff"},{"position":0,"color":"#000000"}]}"##,
    )
    .unwrap();
    assert_eq!(p.stops()[0].color, Rgb::BLACK);
    assert!(serde_json::from_str::<GradientProfile>(r#"{"name":"x","stops":[]}"#).is_err());
}
