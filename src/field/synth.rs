use std::sync::Arc;

use rayon::prelude::*;

use crate::field::tile::{FieldLayout, GridPoint, Tile};
use crate::field::wave::{DEFAULT_WAVES, MAX_WAVES, REFERENCE_DENSITY, WaveComponent};
use crate::foundation::core::GRID_SIZE;
use crate::foundation::error::{FieldError, FieldResult};
use crate::gradient::color::Rgb;
use crate::gradient::library::GradientMapper;
use crate::modulation::audio::AudioSpectrum;
use crate::modulation::video::{LuminanceGrid, VideoMirror};
use crate::params::snapshot::SynthesisConfig;

/// Synthesizer tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SynthOptions {
    /// Spread per-point work over a rayon pool. Results are identical either way.
    pub parallel: bool,
    /// Pool size when `parallel` is set; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Mirroring applied to video lookups.
    pub mirror: VideoMirror,
}

/// Modulation samples read for one tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModulationInputs<'a> {
    /// Audio spectrum, present only while audio is playing.
    pub audio: Option<&'a AudioSpectrum>,
    /// Video luminance, present only while video is playing.
    pub video: Option<&'a LuminanceGrid>,
}

/// Per-tile output of the color pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TileShading {
    /// Lowest height in the tile.
    pub min: f64,
    /// Highest height in the tile.
    pub max: f64,
    /// `(h - min) / (max - min)` per point, in point order.
    pub normalized: Vec<f64>,
    /// Gradient color per point, in point order.
    pub colors: Vec<Rgb>,
}

/// Computes surface heights and colors.
#[derive(Clone, Debug)]
pub struct WaveFieldSynthesizer {
    waves: [WaveComponent; MAX_WAVES],
    opts: SynthOptions,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for WaveFieldSynthesizer {
    fn default() -> Self {
        Self {
            waves: DEFAULT_WAVES,
            opts: SynthOptions::default(),
            pool: None,
        }
    }
}

impl WaveFieldSynthesizer {
    /// Synthesizer with the stock wave set.
    pub fn new(opts: SynthOptions) -> FieldResult<Self> {
        let pool = if opts.parallel {
            Some(Arc::new(build_thread_pool(opts.threads)?))
        } else {
            None
        };
        Ok(Self {
            waves: DEFAULT_WAVES,
            opts,
            pool,
        })
    }

    /// Replace the wave set.
    pub fn with_waves(mut self, waves: [WaveComponent; MAX_WAVES]) -> Self {
        self.waves = waves;
        self
    }

    /// Active wave set.
    pub fn waves(&self) -> &[WaveComponent; MAX_WAVES] {
        &self.waves
    }

    /// Options this synthesizer was built with.
    pub fn options(&self) -> SynthOptions {
        self.opts
    }

    /// Raw, unclamped wave sum at `(x, z)`.
    pub fn synthesize(
        &self,
        cfg: &SynthesisConfig,
        x: f64,
        z: f64,
        time: f64,
        audio_modulation: f64,
    ) -> f64 {
        let freq_scale = cfg.wave_density / REFERENCE_DENSITY;
        let count = cfg.wave_count.min(MAX_WAVES);
        let sum: f64 = self.waves[..count]
            .iter()
            .map(|w| w.sample(x, z, time, cfg.wave_speed, freq_scale, audio_modulation))
            .sum();
        sum * cfg.base_amplitude
    }

    /// Wave height clamped to `[-maxHeightBound, maxHeightBound]`.
    pub fn height(
        &self,
        cfg: &SynthesisConfig,
        x: f64,
        z: f64,
        time: f64,
        audio_modulation: f64,
    ) -> f64 {
        clamp_height(
            self.synthesize(cfg, x, z, time, audio_modulation),
            cfg.max_height_bound,
        )
    }

    /// Audio multiplier at `(x, z)`; 1 without a spectrum.
    pub fn audio_modulation(
        cfg: &SynthesisConfig,
        x: f64,
        z: f64,
        time: f64,
        spectrum: Option<&AudioSpectrum>,
    ) -> f64 {
        let Some(spectrum) = spectrum.filter(|s| !s.is_empty()) else {
            return 1.0;
        };
        let phase = (x + z) * cfg.wave_density + time * cfg.wave_speed;
        let idx = spectrum.quarter_band_index((phase.sin() + 1.0) / 2.0);
        1.0 + spectrum.normalized_at(idx) * cfg.audio_amplitude
    }

    /// Video brightness under grid point `(i, j)`; 0 without a sample.
    pub fn video_brightness(
        &self,
        cfg: &SynthesisConfig,
        i: usize,
        j: usize,
        grid: Option<&LuminanceGrid>,
    ) -> f64 {
        grid.map_or(0.0, |g| {
            let b = g.sample_at(i, j, GRID_SIZE, self.opts.mirror);
            if cfg.invert_video { 1.0 - b } else { b }
        })
    }

    /// Full per-point pipeline: audio, waves, video, clamp.
    pub fn point_height(
        &self,
        cfg: &SynthesisConfig,
        point: &GridPoint,
        time: f64,
        inputs: ModulationInputs<'_>,
    ) -> f64 {
        let audio = Self::audio_modulation(cfg, point.x, point.z, time, inputs.audio);
        let h = self.synthesize(cfg, point.x, point.z, time, audio)
            + cfg.video_impact * self.video_brightness(cfg, point.i, point.j, inputs.video);
        clamp_height(h, cfg.max_height_bound)
    }

    /// Recompute every height of `tile`, then derive normalized values and colors.
    pub fn shade_tile(
        &self,
        cfg: &SynthesisConfig,
        tile: &mut Tile,
        time: f64,
        inputs: ModulationInputs<'_>,
        mapper: &GradientMapper,
    ) -> TileShading {
        let points = tile.points_mut();
        let update = |p: &mut GridPoint| p.height = self.point_height(cfg, p, time, inputs);
        match &self.pool {
            Some(pool) => pool.install(|| points.par_iter_mut().for_each(update)),
            None => points.iter_mut().for_each(update),
        }

        let (min, max) = extrema(points);
        let range = max - min;
        let divisor = if range > 0.0 { range } else { 1.0 };
        let normalize = |p: &GridPoint| (p.height - min) / divisor;

        let normalized: Vec<f64> = match &self.pool {
            Some(pool) => pool.install(|| points.par_iter().map(normalize).collect()),
            None => points.iter().map(normalize).collect(),
        };
        let colors: Vec<Rgb> = match &self.pool {
            Some(pool) => {
                pool.install(|| normalized.par_iter().map(|t| mapper.color_at(*t)).collect())
            }
            None => normalized.iter().map(|t| mapper.color_at(*t)).collect(),
        };

        TileShading {
            min,
            max,
            normalized,
            colors,
        }
    }

    /// [`WaveFieldSynthesizer::shade_tile`] over every tile of `layout`.
    pub fn shade_layout(
        &self,
        cfg: &SynthesisConfig,
        layout: &mut FieldLayout,
        time: f64,
        inputs: ModulationInputs<'_>,
        mapper: &GradientMapper,
    ) -> Vec<TileShading> {
        layout
            .tiles_mut()
            .iter_mut()
            .map(|tile| self.shade_tile(cfg, tile, time, inputs, mapper))
            .collect()
    }
}

fn clamp_height(h: f64, bound: f64) -> f64 {
    let bound = bound.max(0.0);
    if h.is_nan() { 0.0 } else { h.clamp(-bound, bound) }
}

fn extrema(points: &[GridPoint]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.height), hi.max(p.height))
        })
}

fn build_thread_pool(threads: Option<usize>) -> FieldResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(FieldError::validation(
            "synth threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FieldError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/field/synth.rs"]
mod tests;
