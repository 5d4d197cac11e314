//! Rendering system
//!
//! Backend-agnostic pieces a mode needs to get a scene on screen:
//!
//! - [`MeshBuffer`]: named sub-mesh ranges inside one packed vertex buffer
//! - [`Pipeline`]: program, vertex array and draw range for one drawable
//! - [`RenderBackend`]: the trait a graphics backend implements
//! - [`RecordingBackend`]: a backend that records calls, for headless runs
//!
//! Scene traversal lives in [`crate::scene::Scene::draw`].

pub mod backend;
pub mod commands;
pub mod mesh;
pub mod pipeline;

pub use backend::{ClearFlags, DepthFunc, DrawCall, RenderBackend};
pub use commands::{RecordingBackend, RenderCommand};
pub use mesh::{AttributeFormat, MeshBuffer, MeshRange, PrimitiveType, VertexAttribute, VertexLayout};
pub use pipeline::{lit_color_texture_pipeline, Pipeline, ProgramId, VertexArray, LIT_COLOR_TEXTURE_PROGRAM};

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// IO error while reading a mesh index
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Mesh index could not be parsed
    #[error("Mesh index parse error: {0}")]
    Parse(String),

    /// No sub-mesh with this name
    #[error("Mesh not found: {0}")]
    MeshNotFound(String),

    /// Two sub-meshes share a name
    #[error("Duplicate mesh name: {0}")]
    DuplicateMesh(String),

    /// Sub-mesh range extends past the vertex buffer
    #[error("Mesh '{mesh}' ends at vertex {end}, buffer has {vertex_count}")]
    RangeOutOfBounds {
        /// Offending mesh
        mesh: String,
        /// One past the last vertex of the range
        end: u64,
        /// Vertices in the buffer
        vertex_count: u32,
    },
}
