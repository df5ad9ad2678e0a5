use crate::animation::lerp::FlagBlend;
use crate::foundation::core::FrameIndex;
use crate::timeline::keyframe::{KeyframeId, TimelineSample};
use crate::timeline::model::Timeline;

/// Transport state owned by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    /// Frame shown, in `[0, totalFrames - 1]`.
    pub current_frame: FrameIndex,
    /// Whether ticks advance the frame.
    pub is_playing: bool,
    /// Wall-clock milliseconds not yet converted into frames.
    pub frame_accumulator: f64,
    /// Keyframe open for editing.
    pub selected_keyframe: Option<KeyframeId>,
    /// Disable user camera controls while playing.
    pub lock_controls_during_playback: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_frame: FrameIndex(0),
            is_playing: false,
            frame_accumulator: 0.0,
            selected_keyframe: None,
            lock_controls_during_playback: true,
        }
    }
}

/// Outcome of one [`PlaybackScheduler::advance`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Advance {
    /// Whole frames consumed from the accumulator.
    pub frames_advanced: u64,
    /// Playback passed the end and wrapped to the start.
    pub wrapped: bool,
    /// Playback reached the end of a non-looping timeline and stopped.
    pub finished: bool,
    /// Timeline state at the resulting frame; `None` when not playing or without keyframes.
    pub sample: Option<TimelineSample>,
}

/// Fixed-step transport over a [`Timeline`].
#[derive(Clone, Debug, Default)]
pub struct PlaybackScheduler {
    state: PlaybackState,
    flags: FlagBlend,
}

impl PlaybackScheduler {
    /// Stopped at frame 0 with the default flag policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `flags` when evaluating the timeline.
    pub fn with_flag_blend(mut self, flags: FlagBlend) -> Self {
        self.flags = flags;
        self
    }

    /// Current transport state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Return `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Frame shown.
    pub fn current_frame(&self) -> FrameIndex {
        self.state.current_frame
    }

    /// Keyframe open for editing.
    pub fn selected(&self) -> Option<KeyframeId> {
        self.state.selected_keyframe
    }

    /// Change the keyframe selection.
    pub fn select(&mut self, id: Option<KeyframeId>) {
        self.state.selected_keyframe = id;
    }

    /// Toggle locking of user camera controls during playback.
    pub fn set_lock_controls(&mut self, lock: bool) {
        self.state.lock_controls_during_playback = lock;
    }

    /// Whether the user may orbit/pan/zoom right now.
    pub fn camera_controls_enabled(&self) -> bool {
        !(self.state.is_playing && self.state.lock_controls_during_playback)
    }

    /// Start advancing from the current frame.
    pub fn play(&mut self) {
        if !self.state.is_playing {
            tracing::debug!(frame = self.state.current_frame.0, "play");
        }
        self.state.is_playing = true;
    }

    /// Freeze at the current frame.
    pub fn pause(&mut self) {
        if self.state.is_playing {
            tracing::debug!(frame = self.state.current_frame.0, "pause");
        }
        self.state.is_playing = false;
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop and rewind to frame 0, dropping any carried sub-frame time.
    pub fn stop(&mut self) {
        tracing::debug!(frame = self.state.current_frame.0, "stop");
        self.state.is_playing = false;
        self.state.current_frame = FrameIndex(0);
        self.state.frame_accumulator = 0.0;
    }

    /// Pull the current frame back inside `timeline` after its length changed.
    pub fn clamp_to(&mut self, timeline: &Timeline) {
        let last = timeline.last_frame();
        if self.state.current_frame > last {
            self.state.current_frame = last;
        }
    }

    /// Jump to `target` (clamped) and evaluate there. Does not change play/pause.
    pub fn scrub(&mut self, timeline: &Timeline, target: i64) -> Option<TimelineSample> {
        let last = timeline.last_frame().0;
        let frame = u64::try_from(target.max(0)).unwrap_or(0).min(last);
        self.state.current_frame = FrameIndex(frame);
        self.sample(timeline)
    }

    /// Scrub to `floor(fraction * totalFrames)`, with `fraction` clamped to `[0, 1]`.
    pub fn scrub_to_fraction(
        &mut self,
        timeline: &Timeline,
        fraction: f64,
    ) -> Option<TimelineSample> {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let frame = (fraction * timeline.total_frames() as f64).floor() as i64;
        self.scrub(timeline, frame)
    }

    /// Scrub to the first frame.
    pub fn jump_start(&mut self, timeline: &Timeline) -> Option<TimelineSample> {
        self.scrub(timeline, 0)
    }

    /// Scrub to the last frame.
    pub fn jump_end(&mut self, timeline: &Timeline) -> Option<TimelineSample> {
        let last = i64::try_from(timeline.last_frame().0).unwrap_or(i64::MAX);
        self.scrub(timeline, last)
    }

    /// Evaluate `timeline` at the current frame.
    pub fn sample(&self, timeline: &Timeline) -> Option<TimelineSample> {
        timeline.evaluate_with(timeline.frame_time(self.state.current_frame), self.flags)
    }

    /// Feed `delta_ms` of wall-clock time while playing.
    ///
    /// Whole frames are taken from the accumulator; the remainder carries to the next call,
    /// including across a loop wrap.
    pub fn advance(&mut self, timeline: &Timeline, delta_ms: f64) -> Advance {
        if !self.state.is_playing {
            return Advance::default();
        }
        self.clamp_to(timeline);

        let delta = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        let frame_ms = timeline.fps().frame_duration_ms();
        self.state.frame_accumulator += delta;
        let steps = (self.state.frame_accumulator / frame_ms).floor();
        self.state.frame_accumulator = (self.state.frame_accumulator - steps * frame_ms).max(0.0);
        let steps = steps as u64;

        let mut out = Advance {
            frames_advanced: steps,
            ..Advance::default()
        };
        if steps > 0 {
            let total = timeline.total_frames();
            let reached = self.state.current_frame.0.saturating_add(steps);
            if reached >= total {
                if timeline.looping() {
                    out.wrapped = true;
                    self.state.current_frame = FrameIndex(reached.checked_rem(total).unwrap_or(0));
                    tracing::debug!(frame = self.state.current_frame.0, "loop wrap");
                } else {
                    out.finished = true;
                    self.state.current_frame = timeline.last_frame();
                    self.state.is_playing = false;
                    tracing::debug!(frame = self.state.current_frame.0, "reached end of timeline");
                }
            } else {
                self.state.current_frame = FrameIndex(reached);
            }
        }
        out.sample = self.sample(timeline);
        out
    }

    /// `Frame: f / total | Time: t.ts / d.ds`.
    pub fn status_line(&self, timeline: &Timeline) -> String {
        format!(
            "Frame: {} / {} | Time: {:.2}s / {:.2}s",
            self.state.current_frame.0,
            timeline.total_frames(),
            timeline.frame_time(self.state.current_frame),
            timeline.duration_seconds()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
