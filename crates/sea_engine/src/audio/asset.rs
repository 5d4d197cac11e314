//! Decoded audio samples
//!
//! Samples are mono PCM at [`SAMPLE_RATE`], held behind an `Arc` so any
//! number of playing instances share one buffer.

use std::sync::Arc;

#[cfg(feature = "rodio")]
use crate::audio::AudioError;

/// Rate every sample is stored and mixed at, in frames per second
pub const SAMPLE_RATE: u32 = 48_000;

/// Immutable mono sample data
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    data: Arc<[f32]>,
}

impl Sample {
    /// Wrap mono PCM frames recorded at [`SAMPLE_RATE`]
    pub fn from_mono(data: impl Into<Vec<f32>>) -> Self {
        Self {
            data: Arc::from(data.into()),
        }
    }

    /// Decode an audio file and resample it to mono at [`SAMPLE_RATE`]
    ///
    /// Accepts whatever the enabled rodio decoders understand (WAV and Ogg
    /// Vorbis by default).
    #[cfg(feature = "rodio")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, AudioError> {
        use rodio::source::UniformSourceIterator;
        use std::io::BufReader;

        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let decoder = rodio::Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::Decode(format!("{}: {}", path.display(), e)))?;
        let frames: Vec<f32> = UniformSourceIterator::<_, f32>::new(decoder, 1, SAMPLE_RATE).collect();
        if frames.is_empty() {
            return Err(AudioError::Decode(format!("{}: no audio frames", path.display())));
        }

        log::info!(
            "Loaded sample {} ({:.2}s)",
            path.display(),
            frames.len() as f32 / SAMPLE_RATE as f32
        );
        Ok(Self::from_mono(frames))
    }

    /// Frames
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sample has no frames
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Playback length in seconds
    pub fn duration_secs(&self) -> f32 {
        self.data.len() as f32 / SAMPLE_RATE as f32
    }
}
