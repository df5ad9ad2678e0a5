use std::fmt;
use std::str::FromStr;

use crate::foundation::error::FieldError;
use crate::foundation::math::round_half_up;

/// Inclusive range enforced when a parameter is mutated from outside the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Integer-valued parameters are rounded half-up before clamping.
    pub integer: bool,
}

impl ParamRange {
    const fn float(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            integer: false,
        }
    }

    const fn int(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            integer: true,
        }
    }

    /// Clamp `v` into range. Non-finite input falls back to `min`.
    pub fn clamp(self, v: f64) -> f64 {
        if !v.is_finite() {
            return self.min;
        }
        let v = if self.integer { round_half_up(v) } else { v };
        v.clamp(self.min, self.max)
    }
}

/// Numeric, externally settable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Global wave amplitude multiplier.
    BaseAmplitude,
    /// Strength of audio modulation.
    AudioAmplitude,
    /// Rendered point size.
    ParticleSize,
    /// Number of active wave components.
    WaveCount,
    /// Spatial frequency scale.
    WaveDensity,
    /// Temporal speed scale.
    WaveSpeed,
    /// Symmetric height clamp.
    MaxHeightBound,
    /// Tiles per axis.
    GridRepetitions,
    /// Grid group X offset.
    GridOffsetX,
    /// Grid group Z offset.
    GridOffsetZ,
    /// Secondary grid X offset.
    TrueOffsetX,
    /// Secondary grid Z offset.
    TrueOffsetZ,
    /// Camera vertical field of view in degrees.
    Fov,
    /// Additive video brightness scale.
    VideoImpact,
    /// Render-time camera roll.
    CamRoll,
    /// Render-time camera shake.
    CamShake,
    /// Render-time camera dolly.
    CamDolly,
}

impl ParamKey {
    /// Every key, in schema order.
    pub const ALL: [Self; 17] = [
        Self::BaseAmplitude,
        Self::AudioAmplitude,
        Self::ParticleSize,
        Self::WaveCount,
        Self::WaveDensity,
        Self::WaveSpeed,
        Self::MaxHeightBound,
        Self::GridRepetitions,
        Self::GridOffsetX,
        Self::GridOffsetZ,
        Self::TrueOffsetX,
        Self::TrueOffsetZ,
        Self::Fov,
        Self::VideoImpact,
        Self::CamRoll,
        Self::CamShake,
        Self::CamDolly,
    ];

    /// Name used in JSON documents and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::BaseAmplitude => "baseAmplitude",
            Self::AudioAmplitude => "audioAmplitude",
            Self::ParticleSize => "particleSize",
            Self::WaveCount => "waveCount",
            Self::WaveDensity => "waveDensity",
            Self::WaveSpeed => "waveSpeed",
            Self::MaxHeightBound => "maxHeightBound",
            Self::GridRepetitions => "gridRepetitions",
            Self::GridOffsetX => "gridOffsetX",
            Self::GridOffsetZ => "gridOffsetZ",
            Self::TrueOffsetX => "trueOffsetX",
            Self::TrueOffsetZ => "trueOffsetZ",
            Self::Fov => "fov",
            Self::VideoImpact => "videoImpact",
            Self::CamRoll => "camRoll",
            Self::CamShake => "camShake",
            Self::CamDolly => "camDolly",
        }
    }

    /// Accepted range.
    pub fn range(self) -> ParamRange {
        match self {
            Self::BaseAmplitude => ParamRange::float(0.0, 2.0),
            Self::AudioAmplitude => ParamRange::float(0.0, 5.0),
            Self::ParticleSize => ParamRange::float(0.05, 1.0),
            Self::WaveCount => ParamRange::int(1.0, 8.0),
            Self::WaveDensity => ParamRange::float(0.005, 0.1),
            Self::WaveSpeed => ParamRange::float(0.1, 5.0),
            Self::MaxHeightBound => ParamRange::int(5.0, 200.0),
            Self::GridRepetitions => ParamRange::int(1.0, 5.0),
            Self::GridOffsetX | Self::GridOffsetZ | Self::TrueOffsetX | Self::TrueOffsetZ => {
                ParamRange::int(-50.0, 50.0)
            }
            Self::Fov => ParamRange::int(30.0, 120.0),
            Self::VideoImpact => ParamRange::float(0.0, 5.0),
            Self::CamRoll => ParamRange::float(-100.0, 100.0),
            Self::CamShake => ParamRange::float(0.0, 50.0),
            Self::CamDolly => ParamRange::float(-50.0, 50.0),
        }
    }

    /// Return `true` when changing this key moves the grid center.
    pub fn moves_grid(self) -> bool {
        matches!(
            self,
            Self::GridOffsetX | Self::GridOffsetZ | Self::TrueOffsetX | Self::TrueOffsetZ
        )
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| FieldError::validation(format!("unknown parameter '{s}'")))
    }
}

/// Boolean, externally toggled parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagKey {
    /// Use `1 - brightness` for video modulation.
    InvertVideo,
    /// Spin the grid about X while not playing.
    AutoRotateX,
    /// Spin the grid about Y while not playing.
    AutoRotateY,
}

impl FromStr for FlagKey {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invertVideo" => Ok(Self::InvertVideo),
            "autoRotateX" => Ok(Self::AutoRotateX),
            "autoRotateY" => Ok(Self::AutoRotateY),
            _ => Err(FieldError::validation(format!("unknown flag '{s}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/ranges.rs"]
mod tests;
