//! Playing sample instances
//!
//! A [`PlayingSample`] is shared between the simulation, which moves it and
//! changes its volume, and the mixer, which advances its read cursor. All of
//! its mutable state sits behind one mutex that is never held while another
//! audio lock is taken.

use crate::audio::spatial::{attenuation, ListenerFrame};
use crate::audio::Sample;
use crate::foundation::math::Vec3;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct VoiceState {
    position: Vec3,
    volume: f32,
    half_volume_radius: f32,
    cursor: usize,
    stopped: bool,
}

/// A sample being played at a point in the world
#[derive(Debug)]
pub struct PlayingSample {
    sample: Sample,
    looping: bool,
    state: Mutex<VoiceState>,
}

impl PlayingSample {
    pub(crate) fn new(sample: Sample, volume: f32, position: Vec3, half_volume_radius: f32, looping: bool) -> Self {
        Self {
            sample,
            looping,
            state: Mutex::new(VoiceState {
                position,
                volume: volume.max(0.0),
                half_volume_radius,
                cursor: 0,
                stopped: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, VoiceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the emitter
    pub fn set_position(&self, position: Vec3) {
        self.state().position = position;
    }

    /// Current emitter position
    pub fn position(&self) -> Vec3 {
        self.state().position
    }

    /// Set the linear volume; negative values are treated as silence
    pub fn set_volume(&self, volume: f32) {
        self.state().volume = volume.max(0.0);
    }

    /// Current linear volume
    pub fn volume(&self) -> f32 {
        self.state().volume
    }

    /// Stop playback; the mixer drops the instance on its next pass
    pub fn stop(&self) {
        self.state().stopped = true;
    }

    /// Whether playback has ended, by [`PlayingSample::stop`] or by running out
    pub fn is_stopped(&self) -> bool {
        self.state().stopped
    }

    /// Whether the sample restarts when it reaches its end
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Add this instance into an interleaved stereo buffer
    ///
    /// Gains are computed once per buffer from the emitter position and
    /// `listener`. Returns `false` once the instance has finished.
    pub(crate) fn mix_into(&self, listener: &ListenerFrame, gain: f32, out: &mut [f32]) -> bool {
        let mut state = self.state();
        if state.stopped {
            return false;
        }
        let data = self.sample.data();
        if data.is_empty() {
            state.stopped = true;
            return false;
        }

        let distance = (state.position - listener.position).norm();
        let level = gain * state.volume * attenuation(distance, state.half_volume_radius);
        let (left, right) = listener.pan_gains(state.position);

        for frame in out.chunks_exact_mut(2) {
            let value = data[state.cursor] * level;
            frame[0] += value * left;
            frame[1] += value * right;

            state.cursor += 1;
            if state.cursor >= data.len() {
                if self.looping {
                    state.cursor = 0;
                } else {
                    state.stopped = true;
                    break;
                }
            }
        }
        !state.stopped
    }
}
