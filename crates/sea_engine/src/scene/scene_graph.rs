//! Transform arena, cameras and drawables
//!
//! The scene owns every transform in a slot map. Everything else (cameras,
//! drawables, modes) refers to transforms by [`TransformId`], resolved once
//! and dereferenced through the scene each frame. Names are unique within a
//! scene; this is enforced on insertion.

use crate::foundation::math::{Mat3, Mat4};
use crate::render::{DrawCall, Pipeline, RenderBackend};
use crate::scene::{Camera, SceneError, Transform, TransformId};
use slotmap::SlotMap;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// A transform paired with the pipeline that draws it
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Transform placing the mesh in the world
    pub transform: TransformId,
    /// Draw configuration
    pub pipeline: Pipeline,
}

/// Scene: transforms, cameras and drawables
///
/// Cloning a scene yields an independent copy whose transform handles are
/// the same as the original's, so a loaded scene can serve as a template
/// for several mode instances.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    transforms: SlotMap<TransformId, Transform>,
    names: HashMap<String, TransformId>,

    /// Cameras in declaration order
    pub cameras: Vec<Camera>,

    /// Drawables in declaration order
    pub drawables: Vec<Drawable>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transform
    ///
    /// Fails on a duplicate name or a parent that is not in this scene.
    pub fn add_transform(&mut self, transform: Transform) -> Result<TransformId, SceneError> {
        if self.names.contains_key(transform.name()) {
            return Err(SceneError::DuplicateName(transform.name().to_string()));
        }
        if let Some(parent) = transform.parent() {
            if !self.transforms.contains_key(parent) {
                return Err(SceneError::UnknownTransform(transform.name().to_string()));
            }
        }

        let name = transform.name().to_string();
        let id = self.transforms.insert(transform);
        self.names.insert(name, id);
        Ok(id)
    }

    /// Add a camera; returns its index in [`Scene::cameras`]
    pub fn add_camera(&mut self, camera: Camera) -> Result<usize, SceneError> {
        if !self.transforms.contains_key(camera.transform) {
            return Err(SceneError::UnknownTransform("<camera>".to_string()));
        }
        self.cameras.push(camera);
        Ok(self.cameras.len() - 1)
    }

    /// Add a drawable for a transform of this scene
    pub fn add_drawable(&mut self, transform: TransformId, pipeline: Pipeline) -> Result<(), SceneError> {
        if !self.transforms.contains_key(transform) {
            return Err(SceneError::UnknownTransform("<drawable>".to_string()));
        }
        self.drawables.push(Drawable { transform, pipeline });
        Ok(())
    }

    /// Transform by handle
    pub fn transform(&self, id: TransformId) -> Option<&Transform> {
        self.transforms.get(id)
    }

    /// Mutable transform by handle
    pub fn transform_mut(&mut self, id: TransformId) -> Option<&mut Transform> {
        self.transforms.get_mut(id)
    }

    /// Handle of the transform with this exact name
    pub fn find(&self, name: &str) -> Option<TransformId> {
        self.names.get(name).copied()
    }

    /// Handle of the transform with this exact name, or a descriptive error
    pub fn require(&self, name: &str) -> Result<TransformId, SceneError> {
        self.find(name)
            .ok_or_else(|| SceneError::NodeNotFound(name.to_string()))
    }

    /// Iterate over all transforms in insertion order
    pub fn transforms(&self) -> impl Iterator<Item = (TransformId, &Transform)> {
        self.transforms.iter()
    }

    /// Number of transforms
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the scene has no transforms
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Local to world matrix, composed through all ancestors
    ///
    /// # Panics
    /// If `id` does not belong to this scene.
    pub fn make_local_to_world(&self, id: TransformId) -> Mat4 {
        let mut matrix = self[id].make_local_to_parent();
        let mut parent = self[id].parent();
        while let Some(ancestor) = parent {
            let node = &self[ancestor];
            matrix = node.make_local_to_parent() * matrix;
            parent = node.parent();
        }
        matrix
    }

    /// World to local matrix, the inverse of [`Scene::make_local_to_world`]
    ///
    /// # Panics
    /// If `id` does not belong to this scene.
    pub fn make_world_to_local(&self, id: TransformId) -> Mat4 {
        let mut matrix = self[id].make_parent_to_local();
        let mut parent = self[id].parent();
        while let Some(ancestor) = parent {
            let node = &self[ancestor];
            matrix *= node.make_parent_to_local();
            parent = node.parent();
        }
        matrix
    }

    /// Submit every drawable as seen from `camera`
    ///
    /// Render state (clears, depth test, blending) is the caller's business;
    /// this only computes per-object matrices and submits draws.
    pub fn draw(&self, camera: &Camera, backend: &mut dyn RenderBackend) {
        let world_to_clip = camera.make_projection() * self.make_world_to_local(camera.transform);

        for drawable in &self.drawables {
            let object_to_world = self.make_local_to_world(drawable.transform);
            let linear: Mat3 = object_to_world.fixed_view::<3, 3>(0, 0).into_owned();
            let normal_to_light = linear
                .try_inverse()
                .map_or_else(Mat3::identity, |inverse| inverse.transpose());

            backend.submit(&DrawCall {
                pipeline: drawable.pipeline.clone(),
                object_to_clip: world_to_clip * object_to_world,
                object_to_light: object_to_world,
                normal_to_light,
            });
        }
    }
}

impl Index<TransformId> for Scene {
    type Output = Transform;

    fn index(&self, id: TransformId) -> &Transform {
        &self.transforms[id]
    }
}

impl IndexMut<TransformId> for Scene {
    fn index_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.transforms[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, UVec2, Vec3};
    use crate::render::{lit_color_texture_pipeline, RecordingBackend};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn two_level_scene() -> (Scene, TransformId, TransformId) {
        let mut scene = Scene::new();
        let root = scene
            .add_transform(
                Transform::new("Root")
                    .with_position(Vec3::new(10.0, 0.0, 0.0))
                    .with_rotation(Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_2)),
            )
            .unwrap();
        let child = scene
            .add_transform(
                Transform::new("Child")
                    .with_position(Vec3::new(1.0, 0.0, 0.0))
                    .with_parent(root),
            )
            .unwrap();
        (scene, root, child)
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut scene = Scene::new();
        scene.add_transform(Transform::new("Camera")).unwrap();
        let result = scene.add_transform(Transform::new("Camera"));
        assert!(matches!(result, Err(SceneError::DuplicateName(name)) if name == "Camera"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_require_reports_missing_name() {
        let (scene, root, _) = two_level_scene();
        assert_eq!(scene.require("Root").unwrap(), root);
        let err = scene.require("Propeller").unwrap_err();
        assert_eq!(err.to_string(), "Required scene node not found: Propeller");
    }

    #[test]
    fn test_local_to_world_composes_parents() {
        let (scene, _, child) = two_level_scene();
        let world = scene.make_local_to_world(child).transform_point(&Point3::origin());
        assert_relative_eq!(world.coords, Vec3::new(10.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_world_to_local_inverts_local_to_world() {
        let (scene, _, child) = two_level_scene();
        let product = scene.make_world_to_local(child) * scene.make_local_to_world(child);
        assert_relative_eq!(product, Mat4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_clone_keeps_handles_and_detaches_state() {
        let (template, root, _) = two_level_scene();
        let mut copy = template.clone();
        copy[root].position = Vec3::new(-5.0, 0.0, 0.0);

        assert_eq!(template[root].position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(copy[root].name(), "Root");
    }

    #[test]
    fn test_draw_submits_one_call_per_drawable() {
        let (mut scene, root, child) = two_level_scene();
        let camera_transform = scene
            .add_transform(Transform::new("Camera").with_position(Vec3::new(0.0, 0.0, 20.0)))
            .unwrap();
        let mut camera = Camera::new(camera_transform);
        camera.set_aspect_from(UVec2::new(800, 600));
        scene.add_camera(camera).unwrap();
        scene.add_drawable(root, lit_color_texture_pipeline()).unwrap();
        scene.add_drawable(child, lit_color_texture_pipeline()).unwrap();

        let mut backend = RecordingBackend::new();
        scene.draw(&scene.cameras[0], &mut backend);

        let draws: Vec<_> = backend.draws().collect();
        assert_eq!(draws.len(), 2);
        assert_relative_eq!(draws[1].object_to_light, scene.make_local_to_world(child), epsilon = 1e-6);
    }

    #[test]
    fn test_foreign_handle_rejected_for_drawable() {
        let (other, root, _) = two_level_scene();
        let mut scene = Scene::new();
        assert!(other.transform(root).is_some());
        assert!(scene.add_drawable(root, lit_color_texture_pipeline()).is_err());
    }
}
