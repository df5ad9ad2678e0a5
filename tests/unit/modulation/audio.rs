use super::*;

#[test]
fn byte_bins_normalize_by_255() {
    let s = AudioSpectrum::from_bytes(&[0, 51, 255]);
    assert_eq!(s.normalized_at(0), 0.0);
    assert_eq!(s.normalized_at(1), 0.2);
    assert_eq!(s.normalized_at(2), 1.0);
    assert_eq!(s.normalized_at(99), 1.0);
}

#[test]
fn empty_spectrum_reads_zero() {
    let s = AudioSpectrum::from_bytes(&[]);
    assert!(s.is_empty());
    assert_eq!(s.normalized_at(0), 0.0);
    assert_eq!(s.quarter_band_index(0.7), 0);
}

#[test]
fn quarter_band_indexing() {
    let s = AudioSpectrum::from_bytes(&[0; ANALYSER_BINS]);
    assert_eq!(s.quarter_band_index(0.0), 0);
    assert_eq!(s.quarter_band_index(0.5), 16);
    assert_eq!(s.quarter_band_index(1.0), 32);
    assert_eq!(s.quarter_band_index(f64::NAN), 0);
}

#[test]
fn custom_full_scale_is_validated() {
    assert!(AudioSpectrum::new(vec![1.0], 0.0).is_err());
    let s = AudioSpectrum::new(vec![0.5, 2.0], 1.0).unwrap();
    assert_eq!(s.normalized_at(0), 0.5);
    assert_eq!(s.normalized_at(1), 1.0);
}
