//! Math utilities and types
//!
//! Provides the nalgebra aliases used for poses, projections and audio
//! positions, plus the exponential smoothing used by frame-rate independent
//! controllers.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Unsigned 2D size (window and drawable dimensions)
pub type UVec2 = Vector2<u32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build a rotation from XYZ Euler angles in radians.
///
/// The composition is `qz * qy * qx`, so the X rotation is applied first.
/// For a single non-zero component this is exactly the rotation about that
/// axis.
pub fn quat_from_euler(angles: Vec3) -> Quat {
    let qx = Quat::from_axis_angle(&Vec3::x_axis(), angles.x);
    let qy = Quat::from_axis_angle(&Vec3::y_axis(), angles.y);
    let qz = Quat::from_axis_angle(&Vec3::z_axis(), angles.z);
    qz * qy * qx
}

/// Fraction of the remaining distance covered in `elapsed` seconds when
/// approaching a target at `rate` per second.
///
/// Always in `[0, 1]`, so a smoothed value can never overshoot its target.
pub fn blend_factor(rate: f32, elapsed: f32) -> f32 {
    (1.0 - (-rate * elapsed.max(0.0)).exp()).clamp(0.0, 1.0)
}

/// Move `current` toward `target` with exponential smoothing.
pub fn smooth_toward(current: f32, target: f32, rate: f32, elapsed: f32) -> f32 {
    utils::lerp(current, target, blend_factor(rate, elapsed))
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
