//! Scene description files
//!
//! A scene file is a RON document listing nodes in order. Parents are given
//! by index and must precede their children, so every file describes a
//! forest. Rotations are quaternions written `(x, y, z, w)`.
//!
//! ```ron
//! (
//!     nodes: [
//!         (name: "SubmarineSet", position: (0.0, 0.0, -4.0)),
//!         (name: "Hull", parent: Some(0), mesh: Some("Hull")),
//!         (name: "Camera", parent: Some(0), position: (-12.0, 0.0, 3.0),
//!          camera: Some((fovy: 1.0, near: 0.1, far: 500.0))),
//!     ],
//! )
//! ```

use crate::foundation::math::{Quat, Quaternion, Vec3};
use crate::scene::{Camera, Scene, SceneError, Transform, TransformId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Camera parameters attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    /// Vertical field of view in radians
    pub fovy: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

/// One node of a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Unique node name
    pub name: String,
    /// Index of an earlier node to parent to
    #[serde(default)]
    pub parent: Option<usize>,
    /// Position relative to the parent
    #[serde(default)]
    pub position: [f32; 3],
    /// Rotation relative to the parent, `(x, y, z, w)`
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    /// Scale relative to the parent
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Name of the mesh drawn at this node
    #[serde(default)]
    pub mesh: Option<String>,
    /// Camera parameters if this node carries a camera
    #[serde(default)]
    pub camera: Option<CameraDescription>,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Parsed scene file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Nodes in declaration order
    pub nodes: Vec<NodeDescription>,
}

impl SceneDescription {
    /// Parse a RON scene description
    pub fn from_ron(source: &str) -> Result<Self, SceneError> {
        ron::from_str(source).map_err(|e| SceneError::Parse(e.to_string()))
    }
}

impl Scene {
    /// Build a scene from a description
    ///
    /// `on_mesh` is called once per mesh-bearing node, in file order, after
    /// all transforms and cameras exist. It receives the scene under
    /// construction, the node's handle and the mesh name, and typically adds
    /// a drawable. Its error type only needs to absorb [`SceneError`].
    pub fn from_description<E, F>(description: &SceneDescription, mut on_mesh: F) -> Result<Self, E>
    where
        E: From<SceneError>,
        F: FnMut(&mut Scene, TransformId, &str) -> Result<(), E>,
    {
        let mut scene = Scene::new();
        let mut ids: Vec<TransformId> = Vec::with_capacity(description.nodes.len());

        for (index, node) in description.nodes.iter().enumerate() {
            let [x, y, z, w] = node.rotation;
            let rotation = Quaternion::new(w, x, y, z);
            if rotation.norm() <= f32::EPSILON {
                return Err(SceneError::InvalidRotation(node.name.clone()).into());
            }
            if node.scale.iter().any(|s| !s.is_finite() || s.abs() <= f32::EPSILON) {
                return Err(SceneError::InvalidScale(node.name.clone()).into());
            }

            let mut transform = Transform::new(node.name.as_str())
                .with_position(Vec3::from(node.position))
                .with_rotation(Quat::from_quaternion(rotation))
                .with_scale(Vec3::from(node.scale));
            if let Some(parent) = node.parent {
                if parent >= index {
                    return Err(SceneError::InvalidParent {
                        node: node.name.clone(),
                        parent,
                    }
                    .into());
                }
                transform = transform.with_parent(ids[parent]);
            }
            ids.push(scene.add_transform(transform)?);
        }

        for (node, &id) in description.nodes.iter().zip(&ids) {
            if let Some(params) = &node.camera {
                scene.add_camera(Camera {
                    transform: id,
                    fovy: params.fovy,
                    aspect: 1.0,
                    near: params.near,
                    far: params.far,
                })?;
            }
        }

        for (node, &id) in description.nodes.iter().zip(&ids) {
            if let Some(mesh) = &node.mesh {
                on_mesh(&mut scene, id, mesh)?;
            }
        }

        log::debug!(
            "Built scene: {} transforms, {} cameras, {} drawables",
            scene.len(),
            scene.cameras.len(),
            scene.drawables.len()
        );
        Ok(scene)
    }

    /// Load a scene file from disk; see [`Scene::from_description`]
    pub fn load<E, F>(path: impl AsRef<Path>, on_mesh: F) -> Result<Self, E>
    where
        E: From<SceneError>,
        F: FnMut(&mut Scene, TransformId, &str) -> Result<(), E>,
    {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(SceneError::Io)?;
        let description = SceneDescription::from_ron(&source)?;
        let scene = Self::from_description(&description, on_mesh)?;
        log::info!("Loaded scene {} ({} transforms)", path.display(), scene.len());
        Ok(scene)
    }
}
