//! Software mixer
//!
//! [`AudioSystem`] holds the listener handle and the list of playing
//! instances. The simulation starts and steers sounds through it; the output
//! thread calls [`AudioSystem::mix`] to pull interleaved stereo frames.
//!
//! Lock order inside `mix`: listener (released after a copy), then the voice
//! list, then each voice. No other path holds two of these at once.

use crate::audio::backend::AudioBackendConfig;
use crate::audio::spatial::{Listener, ListenerLock};
use crate::audio::{PlayingSample, Sample};
use crate::foundation::math::Vec3;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Listener, playing instances and master volume
pub struct AudioSystem {
    config: AudioBackendConfig,
    listener: Arc<dyn ListenerLock>,
    voices: Mutex<Vec<Arc<PlayingSample>>>,
    master_volume: Mutex<f32>,
}

impl AudioSystem {
    /// Create a silent mixer with its own listener
    pub fn new(config: AudioBackendConfig) -> Self {
        Self::with_listener(config, Arc::new(Listener::new()))
    }

    /// Create a silent mixer that spatializes against `listener`
    ///
    /// The same handle is what modes publish their pose through, so pass a
    /// clone of it to the simulation side.
    pub fn with_listener(config: AudioBackendConfig, listener: Arc<dyn ListenerLock>) -> Self {
        log::debug!(
            "Audio mixer: {} Hz, {} frames per buffer",
            config.sample_rate(),
            config.buffer_frames
        );
        Self {
            config,
            listener,
            voices: Mutex::new(Vec::new()),
            master_volume: Mutex::new(1.0),
        }
    }

    /// Output configuration
    pub fn config(&self) -> &AudioBackendConfig {
        &self.config
    }

    /// Listener handle the mixer reads and modes write through
    pub fn listener(&self) -> Arc<dyn ListenerLock> {
        Arc::clone(&self.listener)
    }

    fn voices(&self) -> MutexGuard<'_, Vec<Arc<PlayingSample>>> {
        self.voices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self, sample: &Sample, volume: f32, position: Vec3, half_volume_radius: f32, looping: bool) -> Arc<PlayingSample> {
        let voice = Arc::new(PlayingSample::new(
            sample.clone(),
            volume,
            position,
            half_volume_radius,
            looping,
        ));
        self.voices().push(Arc::clone(&voice));
        voice
    }

    /// Play `sample` once from `position`
    pub fn play_3d(&self, sample: &Sample, volume: f32, position: Vec3, half_volume_radius: f32) -> Arc<PlayingSample> {
        self.start(sample, volume, position, half_volume_radius, false)
    }

    /// Play `sample` repeatedly from `position` until stopped
    pub fn loop_3d(&self, sample: &Sample, volume: f32, position: Vec3, half_volume_radius: f32) -> Arc<PlayingSample> {
        self.start(sample, volume, position, half_volume_radius, true)
    }

    /// Stop every playing instance
    pub fn stop_all(&self) {
        for voice in self.voices().iter() {
            voice.stop();
        }
    }

    /// Number of instances the mixer still holds
    pub fn active_voices(&self) -> usize {
        self.voices().len()
    }

    /// Set the master volume, clamped to [0, 1]
    pub fn set_master_volume(&self, volume: f32) {
        *self.master_volume.lock().unwrap_or_else(PoisonError::into_inner) = volume.clamp(0.0, 1.0);
    }

    /// Master volume
    pub fn master_volume(&self) -> f32 {
        *self.master_volume.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fill `out` with interleaved stereo frames
    ///
    /// The listener is read once per call, so every voice in the buffer is
    /// spatialized against the same pose. Finished instances are dropped.
    pub fn mix(&self, out: &mut [f32]) {
        out.fill(0.0);
        let listener = self.listener.snapshot();
        let gain = self.master_volume();

        self.voices().retain(|voice| voice.mix_into(&listener, gain, &mut *out));
    }
}

impl fmt::Debug for AudioSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioSystem")
            .field("config", &self.config)
            .field("listener", &self.listener.snapshot())
            .field("voices", &self.active_voices())
            .field("master_volume", &self.master_volume())
            .finish()
    }
}

impl Default for AudioSystem {
    fn default() -> Self {
        Self::new(AudioBackendConfig::default())
    }
}
