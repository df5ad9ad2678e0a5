use serde::{Deserialize, Serialize};

/// Wave density at which the component frequencies were authored.
pub const REFERENCE_DENSITY: f64 = 0.02;

/// Number of wave components available to `waveCount`.
pub const MAX_WAVES: usize = 8;

/// Ratio of the Z-axis phase speed to the X-axis one.
const Z_SPEED_RATIO: f64 = 0.8;

/// One sinusoidal contributor to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    /// Spatial frequency at [`REFERENCE_DENSITY`].
    pub frequency: f64,
    /// Peak contribution before modulation.
    pub amplitude: f64,
    /// Temporal speed multiplier.
    pub speed: f64,
    /// Phase offset along X, in radians.
    pub phase: f64,
}

impl WaveComponent {
    /// Component from its four coefficients.
    pub const fn new(frequency: f64, amplitude: f64, speed: f64, phase: f64) -> Self {
        Self {
            frequency,
            amplitude,
            speed,
            phase,
        }
    }

    /// Contribution at `(x, z)` for an already density-scaled `freq_scale`.
    pub fn sample(
        &self,
        x: f64,
        z: f64,
        time: f64,
        wave_speed: f64,
        freq_scale: f64,
        audio_modulation: f64,
    ) -> f64 {
        let f = self.frequency * freq_scale;
        let t = time * self.speed * wave_speed;
        (x * f + t + self.phase).sin() * (z * f + t * Z_SPEED_RATIO).cos()
            * (self.amplitude * audio_modulation)
    }
}

/// Stock component set.
pub const DEFAULT_WAVES: [WaveComponent; MAX_WAVES] = [
    WaveComponent::new(0.02, 1.0, 1.0, 0.0),
    WaveComponent::new(0.03, 0.7, 1.5, 1.0),
    WaveComponent::new(0.05, 0.5, 2.0, 2.0),
    WaveComponent::new(0.01, 1.2, 0.8, 3.0),
    WaveComponent::new(0.04, 0.6, 1.2, 4.0),
    WaveComponent::new(0.025, 0.8, 1.8, 5.0),
    WaveComponent::new(0.035, 0.4, 2.2, 6.0),
    WaveComponent::new(0.015, 0.9, 0.9, 7.0),
];

#[cfg(test)]
#[path = "../../tests/unit/field/wave.rs"]
mod tests;
