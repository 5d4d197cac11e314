//! Vehicle motion integrator
//!
//! Speed, vertical rate and camera yaw offset are smoothed scalars: each frame
//! they move toward a target picked from the held controls by an exponential
//! blend, so they approach their limits without ever crossing them. Hull yaw
//! and propeller spin are applied directly.

use crate::config::VehicleConfig;
use crate::controls::ControlState;
use sea_engine::foundation::math::{smooth_toward, Quat, Vec3};

/// What one frame of input does to the vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    /// Rotation to post-multiply onto the vehicle root
    pub yaw: Quat,
    /// Rotation to post-multiply onto the propeller
    pub propeller: Quat,
    /// Camera rotation relative to its default orientation
    pub camera_offset: Quat,
    /// Translation in the vehicle's frame after `yaw` is applied
    pub displacement: Vec3,
}

/// Smoothed vehicle state
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleMotion {
    config: VehicleConfig,
    forward_axis: Vec3,
    vertical_axis: Vec3,
    yaw_axis: Vec3,
    camera_yaw_axis: Vec3,
    propeller_axis: Vec3,
    speed: f32,
    vertical_rate: f32,
    camera_yaw: f32,
}

impl VehicleMotion {
    /// Vehicle at rest
    pub fn new(config: VehicleConfig) -> Self {
        Self {
            forward_axis: VehicleConfig::axis(config.forward_axis, -Vec3::x()),
            vertical_axis: VehicleConfig::axis(config.vertical_axis, Vec3::z()),
            yaw_axis: VehicleConfig::axis(config.yaw_axis, Vec3::z()),
            camera_yaw_axis: VehicleConfig::axis(config.camera_yaw_axis, Vec3::y()),
            propeller_axis: VehicleConfig::axis(config.propeller_axis, Vec3::x()),
            config,
            speed: 0.0,
            vertical_rate: 0.0,
            camera_yaw: 0.0,
        }
    }

    /// Tuning in use
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Signed speed along the forward axis
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Signed rate along the vertical axis
    pub fn vertical_rate(&self) -> f32 {
        self.vertical_rate
    }

    /// Current camera yaw offset, rad
    pub fn camera_yaw(&self) -> f32 {
        self.camera_yaw
    }

    /// Advance the smoothed state by `elapsed` seconds
    pub fn step(&mut self, controls: &ControlState, elapsed: f32) -> MotionStep {
        let elapsed = elapsed.max(0.0);
        let cfg = &self.config;

        let yaw_input = controls.yaw();
        self.camera_yaw = smooth_toward(
            self.camera_yaw,
            yaw_input * cfg.camera_yaw_max,
            cfg.camera_yaw_blend,
            elapsed,
        );

        let thrust = controls.thrust();
        self.speed = smooth_toward(self.speed, thrust * cfg.speed_max, cfg.speed_blend, elapsed);

        let vertical = controls.vertical();
        self.vertical_rate = smooth_toward(
            self.vertical_rate,
            vertical * cfg.vertical_max,
            cfg.vertical_blend,
            elapsed,
        );

        MotionStep {
            yaw: rotation(self.yaw_axis, yaw_input * cfg.yaw_rate * elapsed),
            propeller: rotation(self.propeller_axis, thrust * cfg.propeller_step),
            camera_offset: rotation(self.camera_yaw_axis, self.camera_yaw),
            displacement: (self.forward_axis * self.speed + self.vertical_axis * self.vertical_rate) * elapsed,
        }
    }
}

fn rotation(axis: Vec3, angle: f32) -> Quat {
    Quat::from_scaled_axis(axis * angle)
}
