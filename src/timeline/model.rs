use crate::animation::lerp::{FlagBlend, Lerp};
use crate::camera::pose::CameraPose;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{FieldError, FieldResult};
use crate::gradient::library::ProfileSelection;
use crate::params::snapshot::FieldParams;
use crate::timeline::keyframe::{Keyframe, KeyframeId, TimelineSample};

/// Default timeline length in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 10.0;

/// Keyframe sequence plus playback settings.
///
/// Keyframes are always sorted by time (ties keep insertion order) and ids are unique.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    fps: Fps,
    duration_seconds: f64,
    looping: bool,
    keyframes: Vec<Keyframe>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            looping: false,
            keyframes: Vec::new(),
        }
    }
}

impl Timeline {
    /// Empty, non-looping timeline.
    pub fn new(fps: Fps, duration_seconds: f64) -> FieldResult<Self> {
        validate_duration(duration_seconds)?;
        Ok(Self {
            fps,
            duration_seconds,
            looping: false,
            keyframes: Vec::new(),
        })
    }

    /// Build from parts, sorting keyframes and checking every invariant.
    pub fn from_parts(
        fps: Fps,
        duration_seconds: f64,
        looping: bool,
        mut keyframes: Vec<Keyframe>,
    ) -> FieldResult<Self> {
        validate_duration(duration_seconds)?;
        for kf in &keyframes {
            validate_time(kf)?;
        }
        let mut ids: Vec<KeyframeId> = keyframes.iter().map(|k| k.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(FieldError::invariant(format!(
                "duplicate keyframe id {}",
                pair[0]
            )));
        }
        keyframes.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
        Ok(Self {
            fps,
            duration_seconds,
            looping,
            keyframes,
        })
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Whether playback wraps at the end.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Keyframes in time order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Return `true` when there are no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// `floor(durationSeconds * fps)`.
    pub fn total_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.duration_seconds)
    }

    /// Last addressable frame (0 for an empty range).
    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.total_frames().saturating_sub(1))
    }

    /// Timeline seconds at `frame`.
    pub fn frame_time(&self, frame: FrameIndex) -> f64 {
        self.fps.frame_to_secs(frame)
    }

    /// Change the frame rate.
    pub fn set_fps(&mut self, fps: u32) -> FieldResult<()> {
        self.fps = Fps::new(fps)?;
        Ok(())
    }

    /// Change the length.
    pub fn set_duration(&mut self, duration_seconds: f64) -> FieldResult<()> {
        validate_duration(duration_seconds)?;
        self.duration_seconds = duration_seconds;
        Ok(())
    }

    /// Enable or disable wrapping.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Copy with every custom color selection written as the listed index `custom_index`.
    ///
    /// Documents store `colorProfile` as a number; an index past the profile list reads back as
    /// the custom gradient.
    pub fn with_custom_profile_index(&self, custom_index: usize) -> Self {
        let mut out = self.clone();
        for kf in &mut out.keyframes {
            if kf.parameters.color_profile == ProfileSelection::Custom {
                kf.parameters.color_profile = ProfileSelection::Profile(custom_index);
            }
        }
        out
    }

    /// Keyframe by id.
    pub fn get(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == id)
    }

    /// An id not yet in use: `hint` unless that is taken or older than the newest id.
    pub fn allocate_id(&self, hint: u64) -> KeyframeId {
        let next = self
            .keyframes
            .iter()
            .map(|k| k.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        KeyframeId(hint.max(next))
    }

    /// Insert after any keyframes at the same time.
    pub fn insert(&mut self, keyframe: Keyframe) -> FieldResult<()> {
        validate_time(&keyframe)?;
        if self.get(keyframe.id).is_some() {
            return Err(FieldError::invariant(format!(
                "duplicate keyframe id {}",
                keyframe.id
            )));
        }
        let at = self
            .keyframes
            .partition_point(|k| k.time_seconds <= keyframe.time_seconds);
        self.keyframes.insert(at, keyframe);
        Ok(())
    }

    /// Remove and return the keyframe with `id`.
    pub fn remove(&mut self, id: KeyframeId) -> FieldResult<Keyframe> {
        let idx = self.index_of(id)?;
        Ok(self.keyframes.remove(idx))
    }

    /// Replace the keyframe with the same id and restore time order.
    pub fn replace(&mut self, keyframe: Keyframe) -> FieldResult<()> {
        validate_time(&keyframe)?;
        let idx = self.index_of(keyframe.id)?;
        self.keyframes[idx] = keyframe;
        self.keyframes
            .sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
        Ok(())
    }

    /// Edit the keyframe with `id` in place. The edit is discarded if it breaks an invariant.
    pub fn update<F>(&mut self, id: KeyframeId, edit: F) -> FieldResult<()>
    where
        F: FnOnce(&mut Keyframe),
    {
        let idx = self.index_of(id)?;
        let mut edited = self.keyframes[idx].clone();
        edit(&mut edited);
        if edited.id != id {
            return Err(FieldError::invariant("keyframe edits must keep the id"));
        }
        self.replace(edited)
    }

    fn index_of(&self, id: KeyframeId) -> FieldResult<usize> {
        self.keyframes
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| FieldError::invariant(format!("no keyframe with id {id}")))
    }

    /// Pose and parameters at `time` with the default flag policy.
    pub fn evaluate(&self, time: f64) -> Option<TimelineSample> {
        self.evaluate_with(time, FlagBlend::default())
    }

    /// Pose and parameters at `time`; `None` when there are no keyframes.
    ///
    /// Outside the keyframe range the nearest keyframe is held. Between two keyframes the
    /// left keyframe's easing shapes the blend.
    pub fn evaluate_with(&self, time: f64, flags: FlagBlend) -> Option<TimelineSample> {
        let after_prev = self.keyframes.partition_point(|k| k.time_seconds <= time);
        let next_idx = self.keyframes.partition_point(|k| k.time_seconds < time);
        let prev = after_prev.checked_sub(1).map(|i| &self.keyframes[i]);
        let next = self.keyframes.get(next_idx);

        match (prev, next) {
            (None, None) => None,
            (Some(p), Some(n)) if n.time_seconds > p.time_seconds => {
                let t = (time - p.time_seconds) / (n.time_seconds - p.time_seconds);
                let eased = p.easing.apply(t);
                Some(TimelineSample {
                    camera: CameraPose::lerp(&p.camera, &n.camera, eased),
                    params: FieldParams::interpolate(&p.parameters, &n.parameters, eased, flags),
                })
            }
            (Some(p), _) => Some(p.sample()),
            (None, Some(n)) => Some(n.sample()),
        }
    }
}

fn validate_duration(duration_seconds: f64) -> FieldResult<()> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(FieldError::validation(format!(
            "durationSeconds must be finite and > 0, got {duration_seconds}"
        )));
    }
    Ok(())
}

fn validate_time(keyframe: &Keyframe) -> FieldResult<()> {
    if !keyframe.time_seconds.is_finite() || keyframe.time_seconds < 0.0 {
        return Err(FieldError::validation(format!(
            "keyframe {} timeSeconds must be finite and >= 0, got {}",
            keyframe.id, keyframe.time_seconds
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
