//! Sea mode assets
//!
//! Loaded once before any mode instance exists and shared read-only after
//! that. Loading binds every mesh-bearing scene node to a pipeline, so the
//! per-frame path never looks anything up.

use sea_engine::audio::{AudioError, Sample, SAMPLE_RATE};
use sea_engine::render::{
    lit_color_texture_pipeline, MeshBuffer, RenderBackend, RenderError, VertexArray, LIT_COLOR_TEXTURE_PROGRAM,
};
use sea_engine::scene::{Scene, SceneDescription, SceneError, TransformId};
use std::f32::consts::TAU;
use std::path::Path;
use thiserror::Error;

/// Mesh index file inside the asset directory
pub const MESH_INDEX_FILE: &str = "sea_meshes.ron";

/// Scene file inside the asset directory
pub const SCENE_FILE: &str = "sea.scene.ron";

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Scene could not be built
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Meshes could not be loaded or bound
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Ambient sample could not be loaded
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

/// Scene template, meshes and ambient loop
#[derive(Debug, Clone)]
pub struct SeaAssets {
    scene: Scene,
    meshes: MeshBuffer,
    vao: VertexArray,
    ambient: Sample,
}

impl SeaAssets {
    /// Load meshes and scene from `dir`, with a synthesized ambient loop
    pub fn load(dir: impl AsRef<Path>, backend: &mut dyn RenderBackend) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let meshes = MeshBuffer::load(dir.join(MESH_INDEX_FILE))?;
        let source = std::fs::read_to_string(dir.join(SCENE_FILE)).map_err(SceneError::Io)?;
        let description = SceneDescription::from_ron(&source)?;

        let assets = Self::from_parts(meshes, &description, ambient_swell(), backend)?;
        log::info!("Loaded sea assets from {}", dir.display());
        Ok(assets)
    }

    /// Build assets from already-parsed parts
    ///
    /// Creates one vertex array for the lit program and gives every
    /// mesh-bearing node a drawable using the shared lit pipeline with that
    /// node's mesh range. Fails if a node names a mesh the buffer lacks.
    pub fn from_parts(
        meshes: MeshBuffer,
        description: &SceneDescription,
        ambient: Sample,
        backend: &mut dyn RenderBackend,
    ) -> Result<Self, AssetError> {
        let vao = backend.create_vertex_array(&meshes, LIT_COLOR_TEXTURE_PROGRAM);
        let base = lit_color_texture_pipeline();

        let scene = Scene::from_description(description, |scene: &mut Scene, id: TransformId, mesh: &str| {
            let range = meshes.lookup(mesh)?;
            scene.add_drawable(id, base.with_mesh(vao, range))?;
            Ok::<(), AssetError>(())
        })?;

        log::debug!(
            "Bound {} drawables to vertex array {:?}",
            scene.drawables.len(),
            vao
        );
        Ok(Self {
            scene,
            meshes,
            vao,
            ambient,
        })
    }

    /// Replace the ambient loop
    #[must_use]
    pub fn with_ambient(mut self, ambient: Sample) -> Self {
        self.ambient = ambient;
        self
    }

    /// Scene template; modes clone it
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mesh buffer the drawables refer into
    pub fn meshes(&self) -> &MeshBuffer {
        &self.meshes
    }

    /// Vertex array shared by all drawables
    pub fn vao(&self) -> VertexArray {
        self.vao
    }

    /// Ambient loop
    pub fn ambient(&self) -> &Sample {
        &self.ambient
    }
}

/// Four-second low swell that loops without a seam
pub fn ambient_swell() -> Sample {
    let frames = SAMPLE_RATE as usize * 4;
    let rate = SAMPLE_RATE as f32;
    let data: Vec<f32> = (0..frames)
        .map(|i| {
            let t = i as f32 / rate;
            let swell = 0.6 + 0.4 * (TAU * 0.25 * t).sin();
            let tone = 0.6 * (TAU * 55.0 * t).sin() + 0.3 * (TAU * 82.5 * t).sin() + 0.1 * (TAU * 110.25 * t).sin();
            0.25 * swell * tone
        })
        .collect();
    Sample::from_mono(data)
}
