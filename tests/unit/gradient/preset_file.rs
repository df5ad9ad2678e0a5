use super::*;
use crate::gradient::library::ProfileSelection;

#[test]
fn saved_presets_roundtrip_through_json() {
    let mut lib = GradientLibrary::default();
    lib.save_custom("Mint").unwrap();
    let json = GradientPresetFile::from_library(&lib)
        .to_json_string_pretty()
        .unwrap();

    let mut fresh = GradientLibrary::default();
    GradientPresetFile::from_json_str(&json)
        .unwrap()
        .install(&mut fresh);
    assert_eq!(fresh.saved_profiles(), lib.saved_profiles());
    assert_eq!(
        fresh.mapper(ProfileSelection::Profile(5)),
        lib.mapper(ProfileSelection::Profile(5))
    );
}

#[test]
fn rejects_wrong_version_and_malformed_documents() {
    let bad_version = r##"{"version":2,"presets":[]}"##;
    assert!(matches!(
        GradientPresetFile::from_json_str(bad_version),
        Err(FieldError::Parse(_))
    ));
    assert!(matches!(
        GradientPresetFile::from_json_str("{"),
        Err(FieldError::Parse(_))
    ));
    let empty_stops = r#"{"version":1,"presets":[{"name":"x","stops":[]}]}"#;
    assert!(GradientPresetFile::from_json_str(empty_stops).is_err());
}

#[test]
fn rejects_too_many_stops() {
    let stops: Vec<String> = (0..11)
        .map(|i| format!(r##"{{"position":{},"color":"#000000"}}"##, f64::from(i) / 10.0))
        .collect();
    let doc = format!(
        r#"{{"version":1,"presets":[{{"name":"wide","stops":[{}]}}]}}"#,
        stops.join(",")
    );
    assert!(matches!(
        GradientPresetFile::from_json_str(&doc),
        Err(FieldError::Parse(_))
    ));
}
