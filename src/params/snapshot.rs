use serde::{Deserialize, Deserializer, Serialize};

use crate::animation::lerp::{FlagBlend, Lerp};
use crate::foundation::core::Vec3;
use crate::foundation::math::round_half_up;
use crate::gradient::library::ProfileSelection;
use crate::params::ranges::{FlagKey, ParamKey};

/// Full snapshot of every animatable parameter.
///
/// This is both the live configuration owned by the engine and the `parameters` object of a
/// keyframe. Missing fields take the defaults below when deserialized; integer fields accept
/// any JSON number and round it half-up. Deserialization does not clamp: call
/// [`FieldParams::sanitize`] before handing a foreign snapshot to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldParams {
    /// Global wave amplitude multiplier.
    pub base_amplitude: f64,
    /// Strength of audio modulation.
    pub audio_amplitude: f64,
    /// Rendered point size.
    pub particle_size: f64,
    /// Number of active wave components.
    #[serde(deserialize_with = "de_int")]
    pub wave_count: i32,
    /// Spatial frequency scale.
    pub wave_density: f64,
    /// Temporal speed scale.
    pub wave_speed: f64,
    /// Symmetric clamp for every synthesized height.
    #[serde(deserialize_with = "de_int")]
    pub max_height_bound: i32,
    /// Active gradient.
    pub color_profile: ProfileSelection,
    /// Tiles per axis.
    #[serde(deserialize_with = "de_int")]
    pub grid_repetitions: i32,
    /// Grid group X offset.
    #[serde(deserialize_with = "de_int")]
    pub grid_offset_x: i32,
    /// Grid group Z offset.
    #[serde(deserialize_with = "de_int")]
    pub grid_offset_z: i32,
    /// Secondary grid X offset.
    #[serde(deserialize_with = "de_int")]
    pub true_offset_x: i32,
    /// Secondary grid Z offset.
    #[serde(deserialize_with = "de_int")]
    pub true_offset_z: i32,
    /// Camera vertical field of view in degrees.
    #[serde(deserialize_with = "de_int")]
    pub fov: i32,
    /// Additive video brightness scale.
    pub video_impact: f64,
    /// Use `1 - brightness` for video modulation.
    pub invert_video: bool,
    /// Spin the grid about X while not playing.
    pub auto_rotate_x: bool,
    /// Spin the grid about Y while not playing.
    pub auto_rotate_y: bool,
    /// Render-time camera roll.
    pub cam_roll: f64,
    /// Render-time camera shake.
    pub cam_shake: f64,
    /// Render-time camera dolly.
    pub cam_dolly: f64,
}

fn de_int<'de, D>(de: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(de)?;
    if !v.is_finite() {
        return Err(serde::de::Error::custom("integer field must be finite"));
    }
    Ok(round_half_up(v).clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            base_amplitude: 1.6,
            audio_amplitude: 2.0,
            particle_size: 0.25,
            wave_count: 6,
            wave_density: 0.06,
            wave_speed: 1.6,
            max_height_bound: 50,
            color_profile: ProfileSelection::Profile(0),
            grid_repetitions: 1,
            grid_offset_x: 15,
            grid_offset_z: 0,
            true_offset_x: 0,
            true_offset_z: 0,
            fov: 75,
            video_impact: 0.0,
            invert_video: false,
            auto_rotate_x: false,
            auto_rotate_y: false,
            cam_roll: 0.0,
            cam_shake: 0.0,
            cam_dolly: 0.0,
        }
    }
}

impl FieldParams {
    /// Read a numeric parameter as `f64`.
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::BaseAmplitude => self.base_amplitude,
            ParamKey::AudioAmplitude => self.audio_amplitude,
            ParamKey::ParticleSize => self.particle_size,
            ParamKey::WaveCount => f64::from(self.wave_count),
            ParamKey::WaveDensity => self.wave_density,
            ParamKey::WaveSpeed => self.wave_speed,
            ParamKey::MaxHeightBound => f64::from(self.max_height_bound),
            ParamKey::GridRepetitions => f64::from(self.grid_repetitions),
            ParamKey::GridOffsetX => f64::from(self.grid_offset_x),
            ParamKey::GridOffsetZ => f64::from(self.grid_offset_z),
            ParamKey::TrueOffsetX => f64::from(self.true_offset_x),
            ParamKey::TrueOffsetZ => f64::from(self.true_offset_z),
            ParamKey::Fov => f64::from(self.fov),
            ParamKey::VideoImpact => self.video_impact,
            ParamKey::CamRoll => self.cam_roll,
            ParamKey::CamShake => self.cam_shake,
            ParamKey::CamDolly => self.cam_dolly,
        }
    }

    /// Clamp `value` to the key's range, store it and return what was stored.
    pub fn set(&mut self, key: ParamKey, value: f64) -> f64 {
        let v = key.range().clamp(value);
        // Range bounds are small integers, so the cast is exact.
        let i = v as i32;
        match key {
            ParamKey::BaseAmplitude => self.base_amplitude = v,
            ParamKey::AudioAmplitude => self.audio_amplitude = v,
            ParamKey::ParticleSize => self.particle_size = v,
            ParamKey::WaveCount => self.wave_count = i,
            ParamKey::WaveDensity => self.wave_density = v,
            ParamKey::WaveSpeed => self.wave_speed = v,
            ParamKey::MaxHeightBound => self.max_height_bound = i,
            ParamKey::GridRepetitions => self.grid_repetitions = i,
            ParamKey::GridOffsetX => self.grid_offset_x = i,
            ParamKey::GridOffsetZ => self.grid_offset_z = i,
            ParamKey::TrueOffsetX => self.true_offset_x = i,
            ParamKey::TrueOffsetZ => self.true_offset_z = i,
            ParamKey::Fov => self.fov = i,
            ParamKey::VideoImpact => self.video_impact = v,
            ParamKey::CamRoll => self.cam_roll = v,
            ParamKey::CamShake => self.cam_shake = v,
            ParamKey::CamDolly => self.cam_dolly = v,
        }
        v
    }

    /// Read a boolean flag.
    pub fn flag(&self, key: FlagKey) -> bool {
        match key {
            FlagKey::InvertVideo => self.invert_video,
            FlagKey::AutoRotateX => self.auto_rotate_x,
            FlagKey::AutoRotateY => self.auto_rotate_y,
        }
    }

    /// Store a boolean flag.
    pub fn set_flag(&mut self, key: FlagKey, value: bool) {
        match key {
            FlagKey::InvertVideo => self.invert_video = value,
            FlagKey::AutoRotateX => self.auto_rotate_x = value,
            FlagKey::AutoRotateY => self.auto_rotate_y = value,
        }
    }

    /// Clamp every numeric field in place.
    pub fn sanitize(&mut self) {
        for key in ParamKey::ALL {
            self.set(key, self.get(key));
        }
    }

    /// Consuming variant of [`FieldParams::sanitize`].
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }

    /// World-space center of the grid group.
    pub fn grid_center(&self) -> Vec3 {
        Vec3::new(
            f64::from(self.grid_offset_x) + f64::from(self.true_offset_x),
            0.0,
            f64::from(self.grid_offset_z) + f64::from(self.true_offset_z),
        )
    }

    /// Tiles per axis as a count; never below 1.
    pub fn repetitions(&self) -> usize {
        usize::try_from(self.grid_repetitions.max(1)).unwrap_or(1)
    }

    /// The subset of parameters read by the synthesizer.
    pub fn synthesis(&self) -> SynthesisConfig {
        SynthesisConfig {
            base_amplitude: self.base_amplitude,
            audio_amplitude: self.audio_amplitude,
            wave_count: usize::try_from(self.wave_count.max(0)).unwrap_or(0),
            wave_density: self.wave_density,
            wave_speed: self.wave_speed,
            max_height_bound: f64::from(self.max_height_bound.max(0)),
            video_impact: self.video_impact,
            invert_video: self.invert_video,
        }
    }

    /// Blend two snapshots at eased fraction `t`.
    ///
    /// Continuous fields blend linearly, integer fields blend and round, flags and
    /// non-listed profile selections switch according to `flags`.
    pub fn interpolate(a: &Self, b: &Self, t: f64, flags: FlagBlend) -> Self {
        let f = |x: f64, y: f64| <f64 as Lerp>::lerp(&x, &y, t);
        let n = |x: i32, y: i32| <i32 as Lerp>::lerp(&x, &y, t);
        Self {
            base_amplitude: f(a.base_amplitude, b.base_amplitude),
            audio_amplitude: f(a.audio_amplitude, b.audio_amplitude),
            particle_size: f(a.particle_size, b.particle_size),
            wave_count: n(a.wave_count, b.wave_count),
            wave_density: f(a.wave_density, b.wave_density),
            wave_speed: f(a.wave_speed, b.wave_speed),
            max_height_bound: n(a.max_height_bound, b.max_height_bound),
            color_profile: ProfileSelection::blend(a.color_profile, b.color_profile, t, flags),
            grid_repetitions: n(a.grid_repetitions, b.grid_repetitions),
            grid_offset_x: n(a.grid_offset_x, b.grid_offset_x),
            grid_offset_z: n(a.grid_offset_z, b.grid_offset_z),
            true_offset_x: n(a.true_offset_x, b.true_offset_x),
            true_offset_z: n(a.true_offset_z, b.true_offset_z),
            fov: n(a.fov, b.fov),
            video_impact: f(a.video_impact, b.video_impact),
            invert_video: flags.pick(a.invert_video, b.invert_video, t),
            auto_rotate_x: flags.pick(a.auto_rotate_x, b.auto_rotate_x, t),
            auto_rotate_y: flags.pick(a.auto_rotate_y, b.auto_rotate_y, t),
            cam_roll: f(a.cam_roll, b.cam_roll),
            cam_shake: f(a.cam_shake, b.cam_shake),
            cam_dolly: f(a.cam_dolly, b.cam_dolly),
        }
    }
}

/// Per-tick synthesizer inputs, derived from [`FieldParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisConfig {
    /// Global wave amplitude multiplier.
    pub base_amplitude: f64,
    /// Strength of audio modulation.
    pub audio_amplitude: f64,
    /// Number of active wave components.
    pub wave_count: usize,
    /// Spatial frequency scale.
    pub wave_density: f64,
    /// Temporal speed scale.
    pub wave_speed: f64,
    /// Symmetric height clamp, never negative.
    pub max_height_bound: f64,
    /// Additive video brightness scale.
    pub video_impact: f64,
    /// Use `1 - brightness` for video modulation.
    pub invert_video: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        FieldParams::default().synthesis()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/snapshot.rs"]
mod tests;
