use std::sync::Arc;

use crate::foundation::error::{FieldError, FieldResult};
use crate::modulation::slot::SampleSlot;

/// Minimum spacing between published video samples, in milliseconds.
pub const VIDEO_SAMPLE_INTERVAL_MS: f64 = 33.0;

/// Per-cell brightness in `[0, 1]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct LuminanceGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl LuminanceGrid {
    /// Wrap `values` (`width * height`, row-major). Values are clamped to `[0, 1]`.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> FieldResult<Self> {
        if width.checked_mul(height) != Some(values.len()) {
            return Err(FieldError::validation(format!(
                "luminance grid {width}x{height} needs {} values, got {}",
                width.saturating_mul(height),
                values.len()
            )));
        }
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 })
            .collect();
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Reduce an RGBA8 frame to `(r + g + b) / 3 / 255` per pixel.
    pub fn from_rgba8(width: usize, height: usize, rgba: &[u8]) -> FieldResult<Self> {
        let expected = width.checked_mul(height).and_then(|n| n.checked_mul(4));
        if expected != Some(rgba.len()) {
            return Err(FieldError::validation(format!(
                "rgba frame {width}x{height} has {} bytes",
                rgba.len()
            )));
        }
        let values = rgba
            .chunks_exact(4)
            .map(|px| (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0 / 255.0)
            .collect();
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Brightness of cell `(x, y)`; 0 outside the grid.
    pub fn brightness(&self, x: usize, y: usize) -> f64 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.values[y * self.width + x]
    }

    /// Brightness under grid point `(i, j)` of a `grid_size` square tile.
    ///
    /// Grid indices map proportionally onto the nearest cell, so a sample of any resolution
    /// covers the whole tile. `i` runs along columns, `j` along rows.
    pub fn sample_at(&self, i: usize, j: usize, grid_size: usize, mirror: VideoMirror) -> f64 {
        if self.values.is_empty() || grid_size == 0 {
            return 0.0;
        }
        let x = scale_index(i, grid_size, self.width);
        let y = scale_index(j, grid_size, self.height);
        let x = if mirror.x { self.width - 1 - x } else { x };
        let y = if mirror.z { self.height - 1 - y } else { y };
        self.brightness(x, y)
    }
}

fn scale_index(idx: usize, from: usize, to: usize) -> usize {
    let scaled = if from == to {
        idx
    } else {
        idx.saturating_mul(to) / from
    };
    scaled.min(to.saturating_sub(1))
}

/// Axis mirroring applied when reading video brightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoMirror {
    /// Flip along grid X.
    pub x: bool,
    /// Flip along grid Z.
    pub z: bool,
}

/// Playback status of the video source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoState {
    /// No video loaded.
    #[default]
    NoSource,
    /// Frames are advancing.
    Playing,
    /// Loaded but paused.
    Paused,
    /// Reached the end.
    Ended,
}

/// Rate-limited producer side of the video luminance buffer.
#[derive(Debug)]
pub struct VideoSampler {
    state: VideoState,
    interval_ms: f64,
    last_sample_ms: Option<f64>,
    slot: Arc<SampleSlot<LuminanceGrid>>,
}

impl Default for VideoSampler {
    fn default() -> Self {
        Self::new(Arc::new(SampleSlot::new()))
    }
}

impl VideoSampler {
    /// Sampler publishing into `slot` at most every [`VIDEO_SAMPLE_INTERVAL_MS`].
    pub fn new(slot: Arc<SampleSlot<LuminanceGrid>>) -> Self {
        Self {
            state: VideoState::NoSource,
            interval_ms: VIDEO_SAMPLE_INTERVAL_MS,
            last_sample_ms: None,
            slot,
        }
    }

    /// Current source status.
    pub fn state(&self) -> VideoState {
        self.state
    }

    /// Update the source status. Unloading the source drops the last sample.
    pub fn set_state(&mut self, state: VideoState) {
        if state == VideoState::NoSource {
            self.slot.clear();
            self.last_sample_ms = None;
        }
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "video source state");
        }
        self.state = state;
    }

    /// Shared buffer the sampler writes into.
    pub fn slot(&self) -> &Arc<SampleSlot<LuminanceGrid>> {
        &self.slot
    }

    /// Offer a frame captured at `now_ms`.
    ///
    /// `capture` only runs when the source is playing and the throttle interval has elapsed.
    /// A failed capture keeps the previous sample. Returns `true` when a new sample was
    /// published.
    pub fn offer<F>(&mut self, now_ms: f64, capture: F) -> bool
    where
        F: FnOnce() -> FieldResult<LuminanceGrid>,
    {
        if self.state != VideoState::Playing {
            return false;
        }
        if let Some(last) = self.last_sample_ms
            && now_ms - last < self.interval_ms
        {
            return false;
        }
        self.last_sample_ms = Some(now_ms);
        match capture() {
            Ok(grid) => {
                self.slot.publish(grid);
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "video frame capture failed");
                false
            }
        }
    }

    /// Latest sample while the source is playing; `None` otherwise.
    pub fn current(&self) -> Option<Arc<LuminanceGrid>> {
        if self.state == VideoState::Playing {
            self.slot.latest()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulation/video.rs"]
mod tests;
