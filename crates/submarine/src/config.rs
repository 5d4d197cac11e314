//! Sea mode configuration
//!
//! Every tuning constant of the mode lives here with its default. Files may
//! be RON or TOML and only need to name the values they change:
//!
//! ```ron
//! (
//!     vehicle: (speed_max: 20.0),
//!     audio: (anchor: Vehicle),
//! )
//! ```

use crate::controls::ControlBindings;
use sea_engine::config::Config;
use sea_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Complete sea mode configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaModeConfig {
    /// Motion tuning
    pub vehicle: VehicleConfig,
    /// Scene node names the mode binds to
    pub nodes: NodeNames,
    /// Ambient emitter settings
    pub audio: AudioSettings,
    /// Key bindings
    pub controls: ControlBindings,
    /// Frame render state
    pub render: RenderSettings,
}

impl Config for SeaModeConfig {}

/// Motion tuning
///
/// Rates are exponential blend rates in 1/s; a scalar approaches its target
/// by `1 - exp(-rate * elapsed)` of the remaining gap each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Vehicle turn rate while a yaw key is held, rad/s
    pub yaw_rate: f32,
    /// Largest camera yaw offset while turning, rad
    pub camera_yaw_max: f32,
    /// Blend rate of the camera yaw offset
    pub camera_yaw_blend: f32,
    /// Largest forward speed magnitude
    pub speed_max: f32,
    /// Blend rate of the forward speed
    pub speed_blend: f32,
    /// Largest vertical rate magnitude
    pub vertical_max: f32,
    /// Blend rate of the vertical rate
    pub vertical_blend: f32,
    /// Propeller rotation per frame while thrust is commanded, rad
    pub propeller_step: f32,
    /// Vehicle-space direction of forward travel
    pub forward_axis: [f32; 3],
    /// Vehicle-space direction of ascent
    pub vertical_axis: [f32; 3],
    /// Vehicle-space axis the hull turns about
    pub yaw_axis: [f32; 3],
    /// Camera-space axis the camera offset turns about
    pub camera_yaw_axis: [f32; 3],
    /// Propeller-space spin axis
    pub propeller_axis: [f32; 3],
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            yaw_rate: 0.5,
            camera_yaw_max: 0.05,
            camera_yaw_blend: 0.9,
            speed_max: 15.0,
            speed_blend: 0.2,
            vertical_max: 10.0,
            vertical_blend: 0.2,
            propeller_step: 0.3,
            forward_axis: [-1.0, 0.0, 0.0],
            vertical_axis: [0.0, 0.0, 1.0],
            yaw_axis: [0.0, 0.0, 1.0],
            camera_yaw_axis: [0.0, 1.0, 0.0],
            propeller_axis: [1.0, 0.0, 0.0],
        }
    }
}

impl VehicleConfig {
    /// Normalized axis, falling back to `fallback` for a zero vector
    pub(crate) fn axis(axis: [f32; 3], fallback: Vec3) -> Vec3 {
        Vec3::from(axis).try_normalize(f32::EPSILON).unwrap_or(fallback)
    }
}

/// Names of the scene nodes the mode drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeNames {
    /// Root of the vehicle hierarchy
    pub vehicle: String,
    /// Camera node
    pub camera: String,
    /// Propeller node
    pub propeller: String,
}

impl Default for NodeNames {
    fn default() -> Self {
        Self {
            vehicle: "SubmarineSet".to_string(),
            camera: "Camera".to_string(),
            propeller: "Propeller".to_string(),
        }
    }
}

/// What the ambient emitter follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmitterAnchor {
    /// The camera's world position
    #[default]
    Camera,
    /// The vehicle root's world position
    Vehicle,
    /// Stay at the configured origin
    Fixed,
}

/// Ambient emitter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Emitter volume
    pub volume: f32,
    /// Where the emitter starts
    pub origin: [f32; 3],
    /// Distance at which the emitter is at half volume
    pub half_volume_radius: f32,
    /// What the emitter follows each frame
    pub anchor: EmitterAnchor,
    /// Optional file for the ambient loop, relative to the asset directory
    pub ambient_sample: Option<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            origin: [0.0, 0.0, 0.0],
            half_volume_radius: 10_000.0,
            anchor: EmitterAnchor::Camera,
            ambient_sample: None,
        }
    }
}

/// Frame render state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Color buffer clear value, RGBA
    pub clear_color: [f32; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.1, 0.0],
        }
    }
}
