//! Audio output backends
//!
//! A backend pulls frames from [`AudioSystem::mix`](crate::audio::AudioSystem::mix)
//! on its own thread. Without the `rodio` feature no device output exists and
//! the mixer is driven by the caller (tests, headless runs).
//!
//! Output always runs at [`SAMPLE_RATE`], the rate every [`Sample`](crate::audio::Sample)
//! is stored at, so playback pitch never depends on configuration.

#[cfg(feature = "rodio")]
pub mod rodio_backend;

use crate::audio::SAMPLE_RATE;

/// Output configuration shared by the mixer and its backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBackendConfig {
    /// Stereo frames mixed per pull
    pub buffer_frames: usize,
}

impl AudioBackendConfig {
    /// Output rate in frames per second
    pub fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    /// Interleaved samples per pull
    pub fn buffer_len(&self) -> usize {
        self.buffer_frames * 2
    }
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self { buffer_frames: 1024 }
    }
}
