use super::*;

#[test]
fn default_library_has_five_builtins() {
    let lib = GradientLibrary::default();
    let names: Vec<_> = lib.profiles().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["Ocean", "Sunset", "Forest", "Neon", "Fire"]);
    assert!(lib.saved_profiles().is_empty());
}

#[test]
fn custom_stop_limits() {
    let mut g = CustomGradient::default();
    while g.stops().len() < MAX_CUSTOM_STOPS {
        g.add_stop().unwrap();
    }
    assert!(matches!(g.add_stop(), Err(FieldError::Invariant(_))));

    let mut g = CustomGradient::default();
    assert!(matches!(g.remove_stop(0), Err(FieldError::Invariant(_))));
    let idx = g.add_stop().unwrap();
    assert_eq!(g.selected(), Some(idx));
    g.remove_stop(idx).unwrap();
    assert_eq!(g.selected(), Some(1));
}

#[test]
fn custom_positions_are_rounded_and_clamped() {
    let mut g = CustomGradient::default();
    g.set_position(0, 120.0).unwrap();
    assert_eq!(g.stops()[0].position, 100.0);
    g.set_position(0, 33.4).unwrap();
    assert_eq!(g.stops()[0].position, 33.0);
    assert!(g.set_position(9, 1.0).is_err());
    assert!(g.set_position(0, f64::NAN).is_err());
}

#[test]
fn custom_mapper_sorts_and_scales_positions() {
    let mut lib = GradientLibrary::default();
    let g = lib.custom_mut();
    g.set_color(0, Rgb::WHITE).unwrap();
    g.set_position(0, 100.0).unwrap();
    g.set_color(1, Rgb::BLACK).unwrap();
    g.set_position(1, 0.0).unwrap();

    let m = lib.mapper(ProfileSelection::Custom);
    assert_eq!(m.stops()[0].position, 0.0);
    assert_eq!(m.stops()[1].position, 1.0);
    assert_eq!(m.color_at(0.25), Rgb::new(0.25, 0.25, 0.25));
}

#[test]
fn out_of_range_index_resolves_to_custom() {
    let lib = GradientLibrary::default();
    assert_eq!(
        lib.mapper(ProfileSelection::Profile(5)),
        lib.mapper(ProfileSelection::Custom)
    );
    assert_ne!(
        lib.mapper(ProfileSelection::Profile(0)),
        lib.mapper(ProfileSelection::Custom)
    );
}

#[test]
fn save_and_delete_presets() {
    let mut lib = GradientLibrary::default();
    assert!(lib.save_custom("   ").is_err());
    let sel = lib.save_custom(" Mint ").unwrap();
    assert_eq!(sel, ProfileSelection::Profile(5));
    assert_eq!(lib.saved_profiles()[0].name(), "Mint");
    assert_eq!(lib.saved_profiles()[0].stops()[1].position, 1.0);

    assert!(lib.delete_saved(ProfileSelection::Profile(0)).is_err());
    assert!(lib.delete_saved(ProfileSelection::Custom).is_err());
    assert!(lib.delete_saved(ProfileSelection::Profile(9)).is_err());
    let removed = lib.delete_saved(sel).unwrap();
    assert_eq!(removed.name(), "Mint");
    assert_eq!(lib.profiles().len(), 5);
}

#[test]
fn selection_serde_and_blend() {
    let s: ProfileSelection = serde_json::from_str("3").unwrap();
    assert_eq!(s, ProfileSelection::Profile(3));
    let s: ProfileSelection = serde_json::from_str("\"custom\"").unwrap();
    assert_eq!(s, ProfileSelection::Custom);
    assert!(serde_json::from_str::<ProfileSelection>("\"ocean\"").is_err());
    assert_eq!(serde_json::to_string(&ProfileSelection::Profile(2)).unwrap(), "2");

    let a = ProfileSelection::Profile(0);
    let b = ProfileSelection::Profile(4);
    assert_eq!(ProfileSelection::blend(a, b, 0.5, FlagBlend::Midpoint), ProfileSelection::Profile(2));
    assert_eq!(
        ProfileSelection::blend(a, ProfileSelection::Custom, 0.4, FlagBlend::Midpoint),
        a
    );
    assert_eq!(
        ProfileSelection::blend(a, ProfileSelection::Custom, 0.6, FlagBlend::Midpoint),
        ProfileSelection::Custom
    );
}
