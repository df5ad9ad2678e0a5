//! Wavefield is an audio/video-reactive procedural wave surface driven by a keyframe timeline.
//!
//! A grid of points is displaced every render tick by a sum of sinusoidal wave components,
//! optionally modulated by an audio spectrum and a video luminance grid, then colored through a
//! gradient profile. Camera pose and every parameter can be keyframed and played back by a
//! fixed-step scheduler. The public API is engine-oriented:
//!
//! - Build an [`Engine`] over a [`ModulationSource`]
//! - Edit parameters, gradients and keyframes through it, or load a [`Timeline`] document
//! - Call [`Engine::tick`] once per render frame and receive the result in a [`RenderSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod camera;
pub(crate) mod engine;
pub(crate) mod field;
pub(crate) mod gradient;
pub(crate) mod modulation;
pub(crate) mod params;
pub(crate) mod playback;
pub(crate) mod timeline;

pub use crate::foundation::core::{FrameIndex, Fps, GRID_SIZE, GRID_SPACING, TILE_GAP_FACTOR, Vec3};
pub use crate::foundation::error::{FieldError, FieldResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::lerp::{FlagBlend, Lerp};
pub use crate::camera::effects::{CameraEffects, EffectiveCamera};
pub use crate::camera::grid::{AUTO_ROTATE_SPEED, GridTransform};
pub use crate::camera::pose::{CameraPose, DEFAULT_CAMERA_POSITION};
pub use crate::engine::driver::{Engine, TickReport};
pub use crate::engine::sink::{NullSink, RenderFrame, RenderSink};
pub use crate::engine::state::{EngineOpts, EngineState};
pub use crate::field::synth::{ModulationInputs, SynthOptions, TileShading, WaveFieldSynthesizer};
pub use crate::field::tile::{FieldLayout, GridPoint, MAX_REPETITIONS, Tile, tile_offset};
pub use crate::field::wave::{DEFAULT_WAVES, MAX_WAVES, REFERENCE_DENSITY, WaveComponent};
pub use crate::gradient::color::Rgb;
pub use crate::gradient::library::{
    CUSTOM_POSITION_SCALE, CustomGradient, CustomStop, GradientLibrary, GradientMapper,
    MAX_CUSTOM_STOPS, MIN_CUSTOM_STOPS, ProfileSelection,
};
pub use crate::gradient::preset_file::{GradientPresetFile, PRESET_FILE_VERSION};
pub use crate::gradient::profile::{ColorStop, GradientProfile, builtin_profiles, sample_stops};
pub use crate::modulation::audio::{ANALYSER_BINS, AudioSpectrum, BYTE_FULL_SCALE};
pub use crate::modulation::slot::SampleSlot;
pub use crate::modulation::source::{LiveModulation, ModulationSource, NullModulation};
pub use crate::modulation::video::{
    LuminanceGrid, VIDEO_SAMPLE_INTERVAL_MS, VideoMirror, VideoSampler, VideoState,
};
pub use crate::params::ranges::{FlagKey, ParamKey, ParamRange};
pub use crate::params::snapshot::{FieldParams, SynthesisConfig};
pub use crate::playback::scheduler::{Advance, PlaybackScheduler, PlaybackState};
pub use crate::timeline::keyframe::{Keyframe, KeyframeId, TimelineSample};
pub use crate::timeline::model::{DEFAULT_DURATION_SECONDS, Timeline};
pub use crate::timeline::schema::TIMELINE_FILE_VERSION;
