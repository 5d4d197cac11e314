//! Rodio output
//!
//! Rodio owns the device thread; [`MixerSource`] is the rodio `Source` it
//! pulls from, refilling its buffer from the shared [`AudioSystem`].

use super::AudioBackendConfig;
use crate::audio::{AudioError, AudioSystem};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::sync::Arc;
use std::time::Duration;

/// Endless stereo source backed by the software mixer
pub struct MixerSource {
    system: Arc<AudioSystem>,
    config: AudioBackendConfig,
    buffer: Vec<f32>,
    position: usize,
}

impl MixerSource {
    /// Source pulling from `system`
    pub fn new(system: Arc<AudioSystem>) -> Self {
        let config = system.config().clone();
        let len = config.buffer_len();
        Self {
            system,
            config,
            buffer: vec![0.0; len],
            position: len,
        }
    }
}

impl Iterator for MixerSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.buffer.len() {
            self.system.mix(&mut self.buffer);
            self.position = 0;
        }
        let value = self.buffer.get(self.position).copied();
        self.position += 1;
        value
    }
}

impl Source for MixerSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.buffer.len().saturating_sub(self.position).max(1))
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Open device output playing the mixer
///
/// Playback stops when this is dropped. The output stream is not `Send`, so
/// keep it on the thread that created it.
pub struct RodioOutput {
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioOutput {
    /// Open the default output device and start pulling from `system`
    pub fn start(system: Arc<AudioSystem>) -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::BackendUnavailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
        sink.append(MixerSource::new(system));
        log::info!("Audio output started");

        Ok(Self {
            _stream: stream,
            _handle: handle,
            sink,
        })
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        self.sink.stop();
        log::info!("Audio output stopped");
    }
}
