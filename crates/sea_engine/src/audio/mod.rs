//! Positional audio
//!
//! ```text
//! simulation thread                  output thread
//! ─────────────────                  ─────────────
//! Listener::update ──┐        ┌── AudioSystem::mix
//! PlayingSample::set_position │        │
//!                    ▼        ▼        │
//!              [listener]  [voice list]┘
//! ```
//!
//! Emitters are [`PlayingSample`]s started through [`AudioSystem`]. The
//! listener pose is written through the [`ListenerLock`] handle from
//! [`AudioSystem::listener`], the same one `mix` reads, so a position and its
//! right vector are always published together.

pub mod asset;
pub mod backend;
pub mod mixer;
pub mod spatial;
pub mod voice;

pub use asset::{Sample, SAMPLE_RATE};
pub use backend::AudioBackendConfig;
pub use mixer::AudioSystem;
pub use spatial::{attenuation, Listener, ListenerFrame, ListenerLock};
pub use voice::PlayingSample;

#[cfg(feature = "rodio")]
pub use backend::rodio_backend::{MixerSource, RodioOutput};

/// Audio errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// File could not be read
    #[error("Audio I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File could not be decoded
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// No usable output device
    #[error("Audio backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Output device refused playback
    #[error("Audio playback failed: {0}")]
    PlaybackFailed(String),
}
