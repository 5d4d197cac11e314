//! # Sea Engine
//!
//! The host framework a real-time mode runs inside: a transform arena with
//! cameras and drawables, a backend-agnostic render surface, keyboard
//! snapshots, positional audio with a lock-guarded listener, and the frame
//! driver that calls a [`Mode`](mode::Mode) once per displayed frame.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sea_engine::prelude::*;
//!
//! struct Idle;
//!
//! impl Mode for Idle {
//!     fn handle_event(&mut self, _event: &AppEvent, _window_size: UVec2) -> bool {
//!         false
//!     }
//!
//!     fn update(&mut self, _elapsed: f32, _keyboard: &KeyboardState) {}
//!
//!     fn draw(&mut self, _drawable_size: UVec2, backend: &mut dyn RenderBackend) {
//!         backend.clear(ClearFlags::COLOR | ClearFlags::DEPTH, [0.0, 0.0, 0.1, 0.0]);
//!     }
//! }
//!
//! let mut driver = FrameDriver::new(Box::new(Idle));
//! let mut backend = RecordingBackend::new();
//! driver.frame(&[], &KeyboardState::new(), 1.0 / 60.0, UVec2::new(1280, 720), &mut backend);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod config;
pub mod foundation;
pub mod input;
pub mod mode;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{AudioSystem, Listener, ListenerFrame, ListenerLock, PlayingSample, Sample},
        config::{Config, ConfigError},
        foundation::math::{quat_from_euler, smooth_toward, Mat4, Quat, UVec2, Vec3},
        input::{KeyCode, KeyboardState},
        mode::{AppEvent, FrameDriver, Mode},
        render::{ClearFlags, DepthFunc, RecordingBackend, RenderBackend},
        scene::{Camera, Scene, SceneError, Transform, TransformId},
    };
}
