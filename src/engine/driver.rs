use std::path::Path;

use crate::camera::effects::{CameraEffects, EffectiveCamera};
use crate::camera::pose::CameraPose;
use crate::engine::sink::{RenderFrame, RenderSink};
use crate::engine::state::{EngineOpts, EngineState};
use crate::field::synth::{ModulationInputs, TileShading, WaveFieldSynthesizer};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FieldError, FieldResult};
use crate::gradient::library::{CustomGradient, GradientLibrary, ProfileSelection};
use crate::gradient::preset_file::GradientPresetFile;
use crate::modulation::source::ModulationSource;
use crate::params::ranges::{FlagKey, ParamKey};
use crate::params::snapshot::FieldParams;
use crate::timeline::keyframe::{Keyframe, KeyframeId, TimelineSample};
use crate::timeline::model::Timeline;

/// Summary of one [`Engine::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick counter value used for this tick.
    pub tick: u64,
    /// Timeline frame after the tick.
    pub frame: FrameIndex,
    /// Frames consumed by playback this tick.
    pub frames_advanced: u64,
    /// Playback wrapped to the start.
    pub wrapped: bool,
    /// Playback reached the end and stopped.
    pub finished: bool,
    /// A timeline sample was applied to the live state.
    pub timeline_applied: bool,
    /// Tiles were rebuilt for a new repetition count.
    pub layout_rebuilt: bool,
    /// An audio spectrum modulated the field.
    pub audio_active: bool,
    /// A video sample modulated the field.
    pub video_active: bool,
    /// User camera controls are enabled.
    pub camera_controls_enabled: bool,
}

/// Owns the live scene and drives it one render tick at a time.
#[derive(Debug)]
pub struct Engine<M> {
    state: EngineState,
    modulation: M,
    synth: WaveFieldSynthesizer,
    opts: EngineOpts,
    shading: Vec<TileShading>,
}

impl<M: ModulationSource> Engine<M> {
    /// Engine over the stock scene.
    pub fn new(modulation: M, opts: EngineOpts) -> FieldResult<Self> {
        Ok(Self {
            state: EngineState::new(opts.flag_blend),
            modulation,
            synth: WaveFieldSynthesizer::new(opts.synth)?,
            opts,
            shading: Vec::new(),
        })
    }

    /// Owned state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Options the engine was built with.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Modulation source.
    pub fn modulation(&self) -> &M {
        &self.modulation
    }

    /// Mutable modulation source, for feeding samples and toggling signals.
    pub fn modulation_mut(&mut self) -> &mut M {
        &mut self.modulation
    }

    /// Per-tile shading from the last tick.
    pub fn shading(&self) -> &[TileShading] {
        &self.shading
    }

    /// Run one render tick.
    ///
    /// Playback advances and its sample is applied before modulation is sampled, and both
    /// happen before synthesis, so changes show in the same tick.
    #[tracing::instrument(level = "trace", skip(self, sink), fields(tick = self.state.tick))]
    pub fn tick<S: RenderSink + ?Sized>(
        &mut self,
        delta_ms: f64,
        time_secs: f64,
        sink: &mut S,
    ) -> TickReport {
        let tick = self.state.tick;
        let advance = self
            .state
            .playback
            .advance(&self.state.timeline, delta_ms);
        let mut report = TickReport {
            tick,
            frames_advanced: advance.frames_advanced,
            wrapped: advance.wrapped,
            finished: advance.finished,
            ..TickReport::default()
        };
        if let Some(sample) = advance.sample {
            report.layout_rebuilt |= self.apply_sample(sample);
            report.timeline_applied = true;
        }

        if !self.state.playback.is_playing() {
            let (x, y) = (self.state.params.auto_rotate_x, self.state.params.auto_rotate_y);
            self.state.grid.auto_rotate(x, y, self.opts.auto_rotate_speed);
        }

        let audio = self.modulation.sample_audio_spectrum();
        let video = self.modulation.sample_video_luminance();
        report.audio_active = audio.is_some();
        report.video_active = video.is_some();
        let inputs = ModulationInputs {
            audio: audio.as_deref(),
            video: video.as_deref(),
        };

        report.layout_rebuilt |= self.state.sync_layout();
        let cfg = self.state.params.synthesis();
        let mapper = self.state.gradients.mapper(self.state.params.color_profile);
        self.shading =
            self.synth
                .shade_layout(&cfg, &mut self.state.layout, time_secs, inputs, &mapper);

        let camera = EffectiveCamera::derive(
            &self.state.camera,
            &CameraEffects::from_params(&self.state.params),
            f64::from(self.state.params.fov),
            self.opts.shake_seed,
            tick,
        );
        sink.render_frame(&RenderFrame {
            tick,
            tiles: self.state.layout.tiles(),
            shading: &self.shading,
            camera,
            grid: self.state.grid,
            particle_size: self.state.params.particle_size,
        });

        report.frame = self.state.playback.current_frame();
        report.camera_controls_enabled = self.state.playback.camera_controls_enabled();
        self.state.tick = tick.wrapping_add(1);
        report
    }

    fn apply_sample(&mut self, sample: TimelineSample) -> bool {
        self.state.params = sample.params.sanitized();
        self.state.camera = sample.camera;
        self.state.recenter_grid();
        self.state.sync_layout()
    }

    fn apply_optional(&mut self, sample: Option<TimelineSample>) {
        if let Some(sample) = sample {
            self.apply_sample(sample);
        }
    }

    // Parameters

    /// Set a numeric parameter (clamped). Returns the stored value.
    ///
    /// Offset edits move the grid and re-aim the camera at its new center; repetition edits
    /// rebuild the tiles.
    pub fn set_param(&mut self, key: ParamKey, value: f64) -> f64 {
        let stored = self.state.params.set(key, value);
        if key.moves_grid() {
            self.state.recenter_grid();
            self.state.camera.target = self.state.params.grid_center();
        }
        if key == ParamKey::GridRepetitions {
            self.state.sync_layout();
        }
        stored
    }

    /// [`Engine::set_param`] by camelCase name.
    pub fn set_param_by_name(&mut self, name: &str, value: f64) -> FieldResult<f64> {
        let key: ParamKey = name.parse()?;
        Ok(self.set_param(key, value))
    }

    /// Set a boolean flag.
    pub fn set_flag(&mut self, key: FlagKey, value: bool) {
        self.state.params.set_flag(key, value);
    }

    /// Replace every parameter with a sanitized copy of `params`.
    pub fn replace_params(&mut self, params: FieldParams) {
        self.state.params = params.sanitized();
        self.state.recenter_grid();
        self.state.camera.target = self.state.params.grid_center();
        self.state.sync_layout();
    }

    /// Zero the accumulated auto-rotation.
    pub fn reset_grid_rotation(&mut self) {
        self.state.grid.reset_rotation();
    }

    /// Move the camera as the user would. Ignored while playback locks the controls.
    pub fn set_camera(&mut self, pose: CameraPose) -> bool {
        if !self.state.playback.camera_controls_enabled() {
            return false;
        }
        self.state.camera = pose;
        true
    }

    // Gradients

    /// Select the active gradient. Listed profiles must exist.
    pub fn set_color_profile(&mut self, selection: ProfileSelection) -> FieldResult<()> {
        if let ProfileSelection::Profile(idx) = selection
            && idx >= self.state.gradients.profiles().len()
        {
            return Err(FieldError::validation(format!(
                "color profile {idx} does not exist ({} profiles)",
                self.state.gradients.profiles().len()
            )));
        }
        self.state.params.color_profile = selection;
        Ok(())
    }

    /// Gradient library.
    pub fn gradients(&self) -> &GradientLibrary {
        &self.state.gradients
    }

    /// Live custom gradient, for stop edits.
    pub fn custom_gradient_mut(&mut self) -> &mut CustomGradient {
        self.state.gradients.custom_mut()
    }

    /// Save the custom gradient as a named profile and select it.
    pub fn save_custom_gradient(&mut self, name: &str) -> FieldResult<ProfileSelection> {
        let selection = self.state.gradients.save_custom(name)?;
        self.state.params.color_profile = selection;
        Ok(selection)
    }

    /// Delete the selected saved profile and fall back to profile 0.
    pub fn delete_selected_gradient(&mut self) -> FieldResult<()> {
        self.state
            .gradients
            .delete_saved(self.state.params.color_profile)?;
        self.state.params.color_profile = ProfileSelection::Profile(0);
        Ok(())
    }

    /// Append presets from a preset document.
    pub fn install_presets(&mut self, presets: GradientPresetFile) {
        presets.install(&mut self.state.gradients);
    }

    // Transport

    /// Start playback.
    pub fn play(&mut self) {
        self.state.playback.play();
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.state.playback.pause();
    }

    /// Toggle play/pause.
    pub fn toggle_playback(&mut self) {
        self.state.playback.toggle();
    }

    /// Stop and rewind.
    pub fn stop(&mut self) {
        self.state.playback.stop();
    }

    /// Jump to `frame` and apply the timeline there.
    pub fn scrub(&mut self, frame: i64) {
        let sample = self.state.playback.scrub(&self.state.timeline, frame);
        self.apply_optional(sample);
    }

    /// Jump to a fraction of the timeline and apply it.
    pub fn scrub_to_fraction(&mut self, fraction: f64) {
        let sample = self
            .state
            .playback
            .scrub_to_fraction(&self.state.timeline, fraction);
        self.apply_optional(sample);
    }

    /// Jump to the first frame.
    pub fn jump_start(&mut self) {
        let sample = self.state.playback.jump_start(&self.state.timeline);
        self.apply_optional(sample);
    }

    /// Jump to the last frame.
    pub fn jump_end(&mut self) {
        let sample = self.state.playback.jump_end(&self.state.timeline);
        self.apply_optional(sample);
    }

    /// Lock or unlock camera controls during playback.
    pub fn set_lock_controls(&mut self, lock: bool) {
        self.state.playback.set_lock_controls(lock);
    }

    /// `Frame: f / total | Time: t.ts / d.ds`.
    pub fn status_line(&self) -> String {
        self.state.playback.status_line(&self.state.timeline)
    }

    // Timeline settings

    /// Change the timeline frame rate.
    pub fn set_timeline_fps(&mut self, fps: u32) -> FieldResult<()> {
        self.state.timeline.set_fps(fps)?;
        self.state.playback.clamp_to(&self.state.timeline);
        Ok(())
    }

    /// Change the timeline length.
    pub fn set_timeline_duration(&mut self, seconds: f64) -> FieldResult<()> {
        self.state.timeline.set_duration(seconds)?;
        self.state.playback.clamp_to(&self.state.timeline);
        Ok(())
    }

    /// Enable or disable looping.
    pub fn set_timeline_loop(&mut self, looping: bool) {
        self.state.timeline.set_looping(looping);
    }

    // Keyframes

    /// Snapshot the live camera and parameters at the current frame and select the result.
    ///
    /// `now_ms` seeds the id; it is bumped when older than or equal to an existing id.
    pub fn add_keyframe(&mut self, now_ms: u64) -> FieldResult<KeyframeId> {
        let id = self.state.timeline.allocate_id(now_ms);
        let time = self
            .state
            .timeline
            .frame_time(self.state.playback.current_frame());
        let keyframe = Keyframe::new(id, time, self.state.camera, self.state.params.clone());
        self.state.timeline.insert(keyframe)?;
        self.state.playback.select(Some(id));
        tracing::debug!(%id, time, "added keyframe");
        Ok(id)
    }

    /// Select a keyframe for editing.
    pub fn select_keyframe(&mut self, id: KeyframeId) -> FieldResult<()> {
        if self.state.timeline.get(id).is_none() {
            return Err(FieldError::invariant(format!("no keyframe with id {id}")));
        }
        self.state.playback.select(Some(id));
        Ok(())
    }

    /// Select a keyframe and scrub to its frame.
    pub fn jump_to_keyframe(&mut self, id: KeyframeId) -> FieldResult<()> {
        self.select_keyframe(id)?;
        let time = self
            .state
            .timeline
            .get(id)
            .map_or(0.0, |k| k.time_seconds);
        let frame = self.state.timeline.fps().secs_to_frames_floor(time);
        self.scrub(i64::try_from(frame).unwrap_or(i64::MAX));
        Ok(())
    }

    /// Drop the keyframe selection.
    pub fn clear_selection(&mut self) {
        self.state.playback.select(None);
    }

    /// Delete the selected keyframe, if any.
    pub fn delete_selected_keyframe(&mut self) -> FieldResult<Option<Keyframe>> {
        let Some(id) = self.state.playback.selected() else {
            return Ok(None);
        };
        let removed = self.state.timeline.remove(id)?;
        self.state.playback.select(None);
        tracing::debug!(%id, "deleted keyframe");
        Ok(Some(removed))
    }

    /// Edit a keyframe. Its parameters are clamped afterwards and the list re-sorted.
    pub fn update_keyframe<F>(&mut self, id: KeyframeId, edit: F) -> FieldResult<()>
    where
        F: FnOnce(&mut Keyframe),
    {
        self.state.timeline.update(id, |k| {
            edit(k);
            k.parameters.sanitize();
        })
    }

    /// Overwrite the selected keyframe's pose with the live camera. Returns `false` without a
    /// selection.
    pub fn update_keyframe_from_view(&mut self) -> FieldResult<bool> {
        let Some(id) = self.state.playback.selected() else {
            return Ok(false);
        };
        let camera = self.state.camera;
        self.state.timeline.update(id, |k| k.camera = camera)?;
        Ok(true)
    }

    // Timeline documents

    /// Replace the timeline wholesale and clear the selection.
    pub fn replace_timeline(&mut self, timeline: Timeline) {
        self.state.timeline = timeline;
        self.state.playback.select(None);
        self.state.playback.clamp_to(&self.state.timeline);
    }

    /// Load a timeline document from JSON text. On error nothing changes.
    pub fn load_timeline_str(&mut self, json: &str) -> FieldResult<()> {
        let timeline = Timeline::from_json_str(json)?;
        self.replace_timeline(timeline);
        Ok(())
    }

    /// Load a timeline document from disk. On error nothing changes.
    pub fn load_timeline_path(&mut self, path: impl AsRef<Path>) -> FieldResult<()> {
        let timeline = Timeline::from_path(path)?;
        self.replace_timeline(timeline);
        Ok(())
    }

    /// Serialize the timeline as a pretty JSON document.
    pub fn save_timeline_string(&self) -> FieldResult<String> {
        self.exported_timeline().to_json_string_pretty()
    }

    /// Write the timeline document to disk.
    pub fn save_timeline_path(&self, path: impl AsRef<Path>) -> FieldResult<()> {
        self.exported_timeline().write_to_path(path)
    }

    fn exported_timeline(&self) -> Timeline {
        self.state
            .timeline
            .with_custom_profile_index(self.state.gradients.profiles().len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/driver.rs"]
mod tests;
