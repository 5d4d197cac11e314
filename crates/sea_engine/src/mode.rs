//! Modes and the per-frame driver
//!
//! A mode is one interactive screen of the application. The host calls it
//! strictly in order, once per displayed frame:
//!
//! ```text
//! handle_event (each pending event) -> update(elapsed, keys) -> draw(size)
//! ```

use crate::foundation::math::UVec2;
use crate::input::{KeyCode, KeyboardState, MouseButton};
use crate::render::RenderBackend;

/// Longest step a single frame may simulate, in seconds
pub const MAX_FRAME_ELAPSED: f32 = 0.1;

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New window width
        width: u32,
        /// New window height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Window gained or lost focus
    Focus(bool),

    /// Key input event
    KeyInput {
        /// The key that changed
        key: KeyCode,
        /// Whether the key went down (true) or up (false)
        pressed: bool,
    },

    /// Mouse button event
    MouseButton {
        /// The mouse button that changed
        button: MouseButton,
        /// Whether the button went down (true) or up (false)
        pressed: bool,
    },

    /// Mouse movement in window coordinates
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },
}

/// One interactive mode
pub trait Mode {
    /// Offer an event to the mode; returns whether it was consumed
    fn handle_event(&mut self, event: &AppEvent, window_size: UVec2) -> bool;

    /// Advance the simulation by `elapsed` seconds given the held keys
    fn update(&mut self, elapsed: f32, keyboard: &KeyboardState);

    /// Render the current state
    fn draw(&mut self, drawable_size: UVec2, backend: &mut dyn RenderBackend);
}

/// Owns the active mode and runs its frame cycle
pub struct FrameDriver {
    mode: Box<dyn Mode>,
    frames: u64,
    unhandled_events: u64,
}

impl FrameDriver {
    /// Drive `mode`
    pub fn new(mode: Box<dyn Mode>) -> Self {
        Self {
            mode,
            frames: 0,
            unhandled_events: 0,
        }
    }

    /// Replace the active mode, dropping the previous one
    pub fn set_mode(&mut self, mode: Box<dyn Mode>) {
        log::debug!("Switching mode after {} frames", self.frames);
        self.mode = mode;
    }

    /// Run one frame: events, then update, then draw
    ///
    /// `elapsed` is clamped to `[0, MAX_FRAME_ELAPSED]` so a stall does not
    /// turn into one huge simulation step.
    pub fn frame(
        &mut self,
        events: &[AppEvent],
        keyboard: &KeyboardState,
        elapsed: f32,
        drawable_size: UVec2,
        backend: &mut dyn RenderBackend,
    ) {
        for event in events {
            if !self.mode.handle_event(event, drawable_size) {
                self.unhandled_events += 1;
            }
        }

        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_ELAPSED)
        } else {
            0.0
        };
        self.mode.update(elapsed, keyboard);
        self.mode.draw(drawable_size, backend);
        self.frames += 1;
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Events no mode consumed
    pub fn unhandled_events(&self) -> u64 {
        self.unhandled_events
    }
}
