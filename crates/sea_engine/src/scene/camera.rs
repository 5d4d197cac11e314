//! Scene cameras

use crate::foundation::math::{Mat4, UVec2};
use crate::scene::TransformId;

/// Perspective camera attached to a scene transform
///
/// The camera looks down its transform's local -Z axis with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Transform providing the camera pose
    pub transform: TransformId,
    /// Vertical field of view in radians
    pub fovy: f32,
    /// Width over height of the output surface
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Camera {
    /// Create a camera with a 60 degree field of view
    pub fn new(transform: TransformId) -> Self {
        Self {
            transform,
            fovy: 60f32.to_radians(),
            aspect: 1.0,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// Track the aspect ratio of a drawable surface
    ///
    /// Zero dimensions (a minimized window) are treated as one pixel so the
    /// projection stays finite.
    pub fn set_aspect_from(&mut self, drawable_size: UVec2) {
        self.aspect = drawable_size.x.max(1) as f32 / drawable_size.y.max(1) as f32;
    }

    /// View to clip matrix
    pub fn make_projection(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fovy, self.near, self.far)
    }
}
