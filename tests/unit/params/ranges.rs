use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for key in ParamKey::ALL {
        assert_eq!(key.name().parse::<ParamKey>().unwrap(), key);
    }
    assert!(matches!(
        "amplitude".parse::<ParamKey>(),
        Err(FieldError::Validation(_))
    ));
}

#[test]
fn clamp_rounds_integers_and_rejects_non_finite() {
    let r = ParamKey::WaveCount.range();
    assert_eq!(r.clamp(3.5), 4.0);
    assert_eq!(r.clamp(12.0), 8.0);
    assert_eq!(r.clamp(f64::NAN), 1.0);
    assert_eq!(r.clamp(f64::INFINITY), 1.0);

    let r = ParamKey::BaseAmplitude.range();
    assert_eq!(r.clamp(1.25), 1.25);
    assert_eq!(r.clamp(-1.0), 0.0);
}

#[test]
fn signed_ranges() {
    assert_eq!(ParamKey::CamRoll.range().clamp(-500.0), -100.0);
    assert_eq!(ParamKey::CamDolly.range().clamp(-500.0), -50.0);
    assert_eq!(ParamKey::GridOffsetX.range().clamp(-50.4), -50.0);
}

#[test]
fn offsets_move_the_grid() {
    assert!(ParamKey::TrueOffsetZ.moves_grid());
    assert!(!ParamKey::Fov.moves_grid());
}

#[test]
fn flag_names() {
    assert_eq!("autoRotateY".parse::<FlagKey>().unwrap(), FlagKey::AutoRotateY);
    assert!("rotate".parse::<FlagKey>().is_err());
}
