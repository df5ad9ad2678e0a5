use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in [Ease::Linear, Ease::EaseInOut] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn smoothstep_is_symmetric_and_monotonic() {
    let e = Ease::EaseInOut;
    assert_eq!(e.apply(0.5), 0.5);
    assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    assert!(e.apply(0.25) < 0.25);
    assert!(e.apply(0.25) < e.apply(0.5));
}

#[test]
fn serde_names_match_timeline_schema() {
    assert_eq!(serde_json::to_string(&Ease::Linear).unwrap(), "\"linear\"");
    assert_eq!(serde_json::to_string(&Ease::EaseInOut).unwrap(), "\"easeInOut\"");
    let e: Ease = serde_json::from_str("\"easeInOut\"").unwrap();
    assert_eq!(e, Ease::EaseInOut);
}
