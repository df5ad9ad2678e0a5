use std::sync::Arc;

use crate::modulation::audio::AudioSpectrum;
use crate::modulation::slot::SampleSlot;
use crate::modulation::video::{LuminanceGrid, VideoSampler, VideoState};

/// Pull-style provider of modulation samples, read once per tick.
///
/// Implementations must not block. `None` means "no signal" and the synthesizer substitutes
/// neutral values.
pub trait ModulationSource {
    /// Latest audio spectrum while audio is playing.
    fn sample_audio_spectrum(&mut self) -> Option<Arc<AudioSpectrum>>;
    /// Latest video luminance grid while video is playing.
    fn sample_video_luminance(&mut self) -> Option<Arc<LuminanceGrid>>;
}

/// Source with no signals at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullModulation;

impl ModulationSource for NullModulation {
    fn sample_audio_spectrum(&mut self) -> Option<Arc<AudioSpectrum>> {
        None
    }

    fn sample_video_luminance(&mut self) -> Option<Arc<LuminanceGrid>> {
        None
    }
}

/// Audio and video buffers fed by external samplers.
#[derive(Debug, Default)]
pub struct LiveModulation {
    audio: Arc<SampleSlot<AudioSpectrum>>,
    audio_playing: bool,
    video: VideoSampler,
}

impl LiveModulation {
    /// Source with empty buffers and nothing playing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer an audio analyser publishes into.
    pub fn audio_slot(&self) -> Arc<SampleSlot<AudioSpectrum>> {
        Arc::clone(&self.audio)
    }

    /// Whether audio is currently playing.
    pub fn audio_playing(&self) -> bool {
        self.audio_playing
    }

    /// Start or stop audio modulation.
    pub fn set_audio_playing(&mut self, playing: bool) {
        if self.audio_playing != playing {
            tracing::debug!(playing, "audio playback");
        }
        self.audio_playing = playing;
    }

    /// Video sampler.
    pub fn video(&self) -> &VideoSampler {
        &self.video
    }

    /// Mutable video sampler, for feeding frames and changing its state.
    pub fn video_mut(&mut self) -> &mut VideoSampler {
        &mut self.video
    }

    /// Shortcut for [`VideoSampler::set_state`].
    pub fn set_video_state(&mut self, state: VideoState) {
        self.video.set_state(state);
    }
}

impl ModulationSource for LiveModulation {
    fn sample_audio_spectrum(&mut self) -> Option<Arc<AudioSpectrum>> {
        if !self.audio_playing {
            return None;
        }
        let spectrum = self.audio.latest();
        if spectrum.as_ref().is_none_or(|s| s.is_empty()) {
            tracing::trace!("audio playing without a spectrum sample");
            return None;
        }
        spectrum
    }

    fn sample_video_luminance(&mut self) -> Option<Arc<LuminanceGrid>> {
        self.video.current()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulation/source.rs"]
mod tests;
