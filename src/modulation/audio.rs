use crate::foundation::error::{FieldError, FieldResult};

/// Bin count of the default analyser (an FFT size of 256).
pub const ANALYSER_BINS: usize = 128;

/// Full-scale value of byte-valued analyser bins.
pub const BYTE_FULL_SCALE: f64 = 255.0;

/// One frequency-magnitude frame from an audio analyser.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSpectrum {
    magnitudes: Vec<f64>,
    full_scale: f64,
}

impl AudioSpectrum {
    /// Build a spectrum whose bins are normalized by `full_scale`.
    pub fn new(magnitudes: Vec<f64>, full_scale: f64) -> FieldResult<Self> {
        if !full_scale.is_finite() || full_scale <= 0.0 {
            return Err(FieldError::validation(format!(
                "spectrum full scale must be finite and > 0, got {full_scale}"
            )));
        }
        Ok(Self {
            magnitudes,
            full_scale,
        })
    }

    /// Byte bins as produced by a browser-style analyser node.
    pub fn from_bytes(bins: &[u8]) -> Self {
        Self {
            magnitudes: bins.iter().copied().map(f64::from).collect(),
            full_scale: BYTE_FULL_SCALE,
        }
    }

    /// Raw bins.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Return `true` when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Bin `idx` normalized to `[0, 1]`. Out-of-range indices read the last bin.
    pub fn normalized_at(&self, idx: usize) -> f64 {
        let Some(last) = self.magnitudes.len().checked_sub(1) else {
            return 0.0;
        };
        let v = self.magnitudes[idx.min(last)] / self.full_scale;
        if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Index into the lowest quarter of the spectrum for a phase already mapped to `[0, 1]`.
    pub fn quarter_band_index(&self, normalized_phase: f64) -> usize {
        let p = if normalized_phase.is_finite() {
            normalized_phase.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let idx = (p * self.magnitudes.len() as f64 / 4.0).floor() as usize;
        idx.min(self.magnitudes.len().saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulation/audio.rs"]
mod tests;
