//! # Submarine
//!
//! A player-driven submarine mode for [`sea_engine`]. Held keys steer and
//! throttle the vehicle through smoothed motion, the camera sways into
//! turns, and an ambient loop plus the audio listener follow the camera.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sea_engine::prelude::*;
//! use submarine::{SeaAssets, SeaMode, SeaModeConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backend = RecordingBackend::new();
//! let assets = SeaAssets::load("crates/submarine/assets", &mut backend)?;
//! let audio = Arc::new(AudioSystem::default());
//! let mode = SeaMode::new(&assets, audio, SeaModeConfig::default())?;
//!
//! let mut driver = FrameDriver::new(Box::new(mode));
//! let keys = KeyboardState::from_pressed([KeyCode::W]);
//! driver.frame(&[], &keys, 1.0 / 60.0, UVec2::new(1280, 720), &mut backend);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod config;
pub mod controls;
pub mod sea_mode;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use assets::{AssetError, SeaAssets};
pub use config::{EmitterAnchor, SeaModeConfig};
pub use controls::{ControlBindings, ControlState};
pub use sea_mode::{ModeError, SeaMode};
pub use vehicle::{MotionStep, VehicleMotion};
