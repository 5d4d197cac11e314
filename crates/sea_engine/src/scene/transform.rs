//! Scene transforms
//!
//! Transforms live in the scene's arena and are addressed by [`TransformId`].
//! A transform's name and parent are fixed when it enters the scene, so the
//! name index stays valid and the hierarchy stays acyclic; pose fields are
//! freely mutable.

use crate::foundation::math::{Mat4, Quat, Vec3};

slotmap::new_key_type! {
    /// Stable handle to a transform inside a [`Scene`](super::Scene)
    pub struct TransformId;
}

/// Named pose node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    name: String,
    parent: Option<TransformId>,

    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation relative to the parent
    pub rotation: Quat,

    /// Scale relative to the parent
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform with no parent
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set parent
    pub fn with_parent(mut self, parent: TransformId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Name, unique within its scene
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent transform, if any
    pub fn parent(&self) -> Option<TransformId> {
        self.parent
    }

    /// Local to parent matrix (TRS order)
    pub fn make_local_to_parent(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Parent to local matrix, the inverse of [`Self::make_local_to_parent`]
    pub fn make_parent_to_local(&self) -> Mat4 {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        Mat4::new_nonuniform_scaling(&inv_scale)
            * self.rotation.inverse().to_homogeneous()
            * Mat4::new_translation(&-self.position)
    }
}
