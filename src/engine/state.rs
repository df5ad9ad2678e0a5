use crate::animation::lerp::FlagBlend;
use crate::camera::grid::{AUTO_ROTATE_SPEED, GridTransform};
use crate::camera::pose::CameraPose;
use crate::field::synth::SynthOptions;
use crate::field::tile::FieldLayout;
use crate::gradient::library::GradientLibrary;
use crate::params::snapshot::FieldParams;
use crate::playback::scheduler::PlaybackScheduler;
use crate::timeline::model::Timeline;

/// Engine tuning that is not part of the animatable state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineOpts {
    /// How boolean fields cross an interpolated span.
    pub flag_blend: FlagBlend,
    /// Synthesizer threading and video mirroring.
    pub synth: SynthOptions,
    /// Seed for camera shake offsets.
    pub shake_seed: u64,
    /// Radians per tick of grid auto-rotation.
    pub auto_rotate_speed: f64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            flag_blend: FlagBlend::default(),
            synth: SynthOptions::default(),
            shake_seed: 0,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }
}

/// Everything the engine owns between ticks.
#[derive(Clone, Debug)]
pub struct EngineState {
    pub(crate) params: FieldParams,
    pub(crate) camera: CameraPose,
    pub(crate) grid: GridTransform,
    pub(crate) layout: FieldLayout,
    pub(crate) gradients: GradientLibrary,
    pub(crate) timeline: Timeline,
    pub(crate) playback: PlaybackScheduler,
    pub(crate) tick: u64,
}

impl EngineState {
    /// Stock scene: default parameters, camera looking at the grid center, empty timeline.
    pub fn new(flag_blend: FlagBlend) -> Self {
        let params = FieldParams::default();
        let center = params.grid_center();
        Self {
            layout: FieldLayout::new(params.repetitions()),
            camera: CameraPose::looking_at(center),
            grid: GridTransform::at(center),
            params,
            gradients: GradientLibrary::default(),
            timeline: Timeline::default(),
            playback: PlaybackScheduler::new().with_flag_blend(flag_blend),
            tick: 0,
        }
    }

    /// Live parameters.
    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Owned camera pose (without render-time effects).
    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    /// Grid group placement.
    pub fn grid(&self) -> &GridTransform {
        &self.grid
    }

    /// Tiles.
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Gradient profiles and the custom gradient.
    pub fn gradients(&self) -> &GradientLibrary {
        &self.gradients
    }

    /// Keyframe timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Transport.
    pub fn playback(&self) -> &PlaybackScheduler {
        &self.playback
    }

    /// Ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn sync_layout(&mut self) -> bool {
        self.layout.ensure_repetitions(self.params.repetitions())
    }

    pub(crate) fn recenter_grid(&mut self) {
        self.grid.translation = self.params.grid_center();
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(FlagBlend::default())
    }
}
