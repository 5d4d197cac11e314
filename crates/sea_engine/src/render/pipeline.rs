//! Draw pipeline configuration
//!
//! A `Pipeline` is everything the backend needs to issue one draw: which
//! program, which vertex array, and which primitive range. Modes bind one per
//! mesh-bearing scene node at load time, starting from a shared base
//! configuration and filling in the mesh-specific fields.

use crate::render::mesh::{MeshRange, PrimitiveType, VertexLayout};

/// Opaque handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProgramId(pub u32);

/// Opaque handle to a vertex array created for a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexArray(pub u32);

/// Program used by all lit, colored, textured geometry
pub const LIT_COLOR_TEXTURE_PROGRAM: ProgramId = ProgramId(1);

/// Per-drawable render configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// Shader program
    pub program: ProgramId,
    /// Vertex layout the program consumes
    pub layout: VertexLayout,
    /// Vertex array bound to the program
    pub vao: VertexArray,
    /// Primitive assembly mode
    pub primitive: PrimitiveType,
    /// First vertex
    pub start: u32,
    /// Vertex count
    pub count: u32,
}

impl Pipeline {
    /// Copy of this pipeline drawing `mesh` from `vao`
    pub fn with_mesh(&self, vao: VertexArray, mesh: &MeshRange) -> Self {
        Self {
            vao,
            primitive: mesh.primitive,
            start: mesh.start,
            count: mesh.count,
            ..self.clone()
        }
    }
}

/// Base pipeline shared by every lit, colored, textured draw
///
/// The vertex array and range are left empty; see [`Pipeline::with_mesh`].
pub fn lit_color_texture_pipeline() -> Pipeline {
    Pipeline {
        program: LIT_COLOR_TEXTURE_PROGRAM,
        layout: VertexLayout::position_normal_color_texcoord(),
        vao: VertexArray::default(),
        primitive: PrimitiveType::Triangles,
        start: 0,
        count: 0,
    }
}
